use ff_ext::FieldSerde;

use crate::{
    BytesHashTranscript, DIGEST_SIZE, FiatShamirHasher, Proof, ProofReader, Statistic,
    Transcript, TranscriptError,
};

/// Verifier side: every read message is taken from the proof and absorbed in
/// the same order the prover wrote it.
#[derive(Clone, Debug)]
pub struct VerifierTranscript<'a, H: FiatShamirHasher> {
    inner: BytesHashTranscript<H>,
    reader: ProofReader<'a>,
}

impl<'a, H: FiatShamirHasher> VerifierTranscript<'a, H> {
    pub fn new(label: &[u8], proof: &'a Proof) -> Self {
        Self {
            inner: BytesHashTranscript::new(label),
            reader: ProofReader::new(proof),
        }
    }

    pub fn read_field_element<T: FieldSerde>(&mut self) -> Result<T, TranscriptError> {
        let offset = self.reader.bytes_consumed();
        let bytes = self.read_bytes(T::SIZE_BYTES)?;
        T::read_bytes(bytes).ok_or(TranscriptError::MalformedElement { offset })
    }

    pub fn read_field_elements<T: FieldSerde>(
        &mut self,
        n: usize,
    ) -> Result<Vec<T>, TranscriptError> {
        let offset = self.reader.bytes_consumed();
        let bytes = self.read_bytes(n * T::SIZE_BYTES)?;
        bytes
            .chunks_exact(T::SIZE_BYTES)
            .enumerate()
            .map(|(i, chunk)| {
                T::read_bytes(chunk).ok_or(TranscriptError::MalformedElement {
                    offset: offset + i * T::SIZE_BYTES,
                })
            })
            .collect()
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], TranscriptError> {
        let bytes = self.reader.read_bytes(n)?;
        self.inner.append_bytes(bytes)?;
        Ok(bytes)
    }

    pub fn read_commitment(&mut self, len: usize) -> Result<&'a [u8], TranscriptError> {
        let payload = self.reader.read_bytes(len)?;
        self.inner.append_commitment(payload)?;
        Ok(payload)
    }

    pub fn bytes_consumed(&self) -> usize {
        self.reader.bytes_consumed()
    }

    pub fn stat(&self) -> Statistic {
        self.inner.stat()
    }

    /// Fails unless the whole proof has been consumed.
    pub fn finish(self) -> Result<(), TranscriptError> {
        match self.reader.remaining() {
            0 => Ok(()),
            remaining => Err(TranscriptError::TrailingBytes { remaining }),
        }
    }
}

impl<H: FiatShamirHasher> Transcript for VerifierTranscript<'_, H> {
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), TranscriptError> {
        self.inner.append_bytes(bytes)
    }

    fn append_commitment(&mut self, payload: &[u8]) -> Result<(), TranscriptError> {
        self.inner.append_commitment(payload)
    }

    fn hash_and_return_state(&mut self) -> [u8; DIGEST_SIZE] {
        self.inner.hash_and_return_state()
    }
}
