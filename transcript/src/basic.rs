use std::marker::PhantomData;

use crate::{
    DIGEST_SIZE, FiatShamirHasher, Statistic, Transcript, TranscriptError,
};

/// Number of field elements that may be absorbed between two squeezes.
pub const MAX_PENDING_ELEMENTS: usize = 4;
/// Widest supported serialized element.
pub const MAX_ELEMENT_BYTES: usize = 64;
pub const PENDING_CAPACITY: usize = DIGEST_SIZE + MAX_PENDING_ELEMENTS * MAX_ELEMENT_BYTES;

/// Hash-chain transcript over raw bytes.
///
/// The pending buffer always starts with the previous digest. Absorbing appends
/// to it; squeezing hashes it and resets it to the new digest.
#[derive(Clone, Debug)]
pub struct BytesHashTranscript<H: FiatShamirHasher> {
    pending: Vec<u8>,
    stat: Statistic,
    _hasher: PhantomData<H>,
}

impl<H: FiatShamirHasher> BytesHashTranscript<H> {
    pub fn new(label: &[u8]) -> Self {
        let mut pending = Vec::with_capacity(PENDING_CAPACITY);
        pending.extend_from_slice(&H::hash(label));
        Self {
            pending,
            stat: Statistic::default(),
            _hasher: PhantomData,
        }
    }

    pub fn stat(&self) -> Statistic {
        self.stat
    }
}

impl<H: FiatShamirHasher> Transcript for BytesHashTranscript<H> {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), TranscriptError> {
        if self.pending.len() + bytes.len() > PENDING_CAPACITY {
            return Err(TranscriptError::BufferOverflow {
                pending: self.pending.len(),
                incoming: bytes.len(),
                capacity: PENDING_CAPACITY,
            });
        }
        self.pending.extend_from_slice(bytes);
        self.stat.bytes_appended += bytes.len();
        Ok(())
    }

    fn append_commitment(&mut self, payload: &[u8]) -> Result<(), TranscriptError> {
        self.append_bytes(&H::hash(payload))
    }

    fn hash_and_return_state(&mut self) -> [u8; DIGEST_SIZE] {
        let digest = H::hash(&self.pending);
        self.pending.clear();
        self.pending.extend_from_slice(&digest);
        self.stat.challenges_drawn += 1;
        digest
    }
}
