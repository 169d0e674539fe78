use crate::{
    DIGEST_SIZE, FiatShamirHasher, ProverTranscript, Transcript, TranscriptError,
    VerifierTranscript,
};

fn grind<H: FiatShamirHasher>(seed: [u8; DIGEST_SIZE], grinding_bits: usize) -> [u8; DIGEST_SIZE] {
    (0..1u64 << grinding_bits).fold(seed, |digest, _| H::hash(&digest))
}

/// Hash the current transcript state `2^grinding_bits` times and write the result.
#[tracing::instrument(skip_all, name = "grind_prover", level = "debug")]
pub fn grind_prover<H: FiatShamirHasher>(
    transcript: &mut ProverTranscript<H>,
    grinding_bits: usize,
) -> Result<(), TranscriptError> {
    let seed = transcript.hash_and_return_state();
    let result = grind::<H>(seed, grinding_bits);
    transcript.write_bytes(&result)
}

#[tracing::instrument(skip_all, name = "grind_verifier", level = "debug")]
pub fn grind_verifier<H: FiatShamirHasher>(
    transcript: &mut VerifierTranscript<'_, H>,
    grinding_bits: usize,
) -> Result<(), TranscriptError> {
    let seed = transcript.hash_and_return_state();
    let expected = grind::<H>(seed, grinding_bits);
    let received = transcript.read_bytes(DIGEST_SIZE)?;
    if received != expected.as_slice() {
        return Err(TranscriptError::GrindingMismatch);
    }
    Ok(())
}
