use ff_ext::FieldSerde;
use serde::{Deserialize, Serialize};

use crate::TranscriptError;

/// The byte stream a prover produces and a verifier consumes front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub bytes: Vec<u8>,
}

impl Proof {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Sequential cursor over a [`Proof`]. There is no way to seek backwards.
#[derive(Clone, Debug)]
pub struct ProofReader<'a> {
    bytes: &'a [u8],
    consumed: usize,
}

impl<'a> ProofReader<'a> {
    pub fn new(proof: &'a Proof) -> Self {
        Self {
            bytes: &proof.bytes,
            consumed: 0,
        }
    }

    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.consumed
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], TranscriptError> {
        if n > self.remaining() {
            return Err(TranscriptError::ProofTruncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes: &'a [u8] = self.bytes;
        let out = &bytes[self.consumed..self.consumed + n];
        self.consumed += n;
        Ok(out)
    }

    pub fn read_field_element<T: FieldSerde>(&mut self) -> Result<T, TranscriptError> {
        let offset = self.consumed;
        let bytes = self.read_bytes(T::SIZE_BYTES)?;
        T::read_bytes(bytes).ok_or(TranscriptError::MalformedElement { offset })
    }
}
