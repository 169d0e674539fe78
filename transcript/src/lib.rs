//! Fiat-Shamir transcript over a byte hash chain, together with the proof
//! byte stream it produces (prover) or consumes (verifier).

use ff_ext::{FieldSerde, SmallField};

mod basic;
mod error;
mod grinding;
mod hasher;
mod proof;
mod read;
mod statistics;
mod write;

pub use basic::{BytesHashTranscript, MAX_ELEMENT_BYTES, MAX_PENDING_ELEMENTS, PENDING_CAPACITY};
pub use error::TranscriptError;
pub use grinding::{grind_prover, grind_verifier};
pub use hasher::{DIGEST_SIZE, FiatShamirHasher, Keccak256Hasher, Sha256Hasher};
pub use proof::{Proof, ProofReader};
pub use read::VerifierTranscript;
pub use statistics::Statistic;
pub use write::ProverTranscript;

/// Shared absorb/squeeze interface of the prover and verifier transcripts.
pub trait Transcript {
    /// Absorb raw bytes. Fails once the pending buffer would exceed
    /// [`PENDING_CAPACITY`] without an intervening squeeze.
    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), TranscriptError>;

    /// Absorb the digest of a commitment payload.
    fn append_commitment(&mut self, payload: &[u8]) -> Result<(), TranscriptError>;

    /// Squeeze: hash the pending buffer, reset it to the digest and return it.
    fn hash_and_return_state(&mut self) -> [u8; DIGEST_SIZE];

    fn append_field_elements<T: FieldSerde>(
        &mut self,
        elements: &[T],
    ) -> Result<(), TranscriptError> {
        let mut buf = Vec::with_capacity(elements.len() * T::SIZE_BYTES);
        elements.iter().for_each(|e| e.write_bytes(&mut buf));
        self.append_bytes(&buf)
    }

    fn append_field_element<T: FieldSerde>(&mut self, element: &T) -> Result<(), TranscriptError> {
        self.append_field_elements(std::slice::from_ref(element))
    }

    /// Draw one scalar challenge from the first 16 bytes of a fresh digest.
    fn challenge<F: SmallField>(&mut self) -> F {
        let digest = self.hash_and_return_state();
        F::from_uniform_bytes(&std::array::from_fn(|i| digest[i]))
    }

    fn challenge_n<F: SmallField>(&mut self, n: usize) -> Vec<F> {
        (0..n).map(|_| self.challenge()).collect()
    }

    fn challenge_u64(&mut self) -> u64 {
        let digest = self.hash_and_return_state();
        u64::from_le_bytes(std::array::from_fn(|i| digest[i]))
    }
}

#[cfg(test)]
mod test;
