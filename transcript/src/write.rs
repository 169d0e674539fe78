use ff_ext::FieldSerde;

use crate::{
    BytesHashTranscript, DIGEST_SIZE, FiatShamirHasher, Proof, Statistic, Transcript,
    TranscriptError,
};

/// Prover side: every written message lands in the proof and in the hash chain.
#[derive(Clone, Debug)]
pub struct ProverTranscript<H: FiatShamirHasher> {
    inner: BytesHashTranscript<H>,
    proof: Proof,
}

impl<H: FiatShamirHasher> ProverTranscript<H> {
    pub fn new(label: &[u8]) -> Self {
        Self {
            inner: BytesHashTranscript::new(label),
            proof: Proof::default(),
        }
    }

    pub fn write_field_elements<T: FieldSerde>(
        &mut self,
        elements: &[T],
    ) -> Result<(), TranscriptError> {
        let mut buf = Vec::with_capacity(elements.len() * T::SIZE_BYTES);
        elements.iter().for_each(|e| e.write_bytes(&mut buf));
        self.write_bytes(&buf)
    }

    pub fn write_field_element<T: FieldSerde>(
        &mut self,
        element: &T,
    ) -> Result<(), TranscriptError> {
        self.write_field_elements(std::slice::from_ref(element))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TranscriptError> {
        self.inner.append_bytes(bytes)?;
        self.proof.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Commitments can be arbitrarily long: the raw payload goes into the
    /// proof, only its digest is absorbed.
    pub fn write_commitment(&mut self, payload: &[u8]) -> Result<(), TranscriptError> {
        self.inner.append_commitment(payload)?;
        self.proof.bytes.extend_from_slice(payload);
        Ok(())
    }

    pub fn proof_len(&self) -> usize {
        self.proof.len()
    }

    pub fn stat(&self) -> Statistic {
        self.inner.stat()
    }

    pub fn finalize(self) -> Proof {
        tracing::info!(
            proof_bytes = self.proof.len(),
            absorbed_bytes = self.inner.stat().bytes_appended,
            challenges = self.inner.stat().challenges_drawn,
            "transcript finalized"
        );
        self.proof
    }
}

impl<H: FiatShamirHasher> Transcript for ProverTranscript<H> {
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
