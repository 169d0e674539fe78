use ff_ext::{
    FieldSerde, Goldilocks, GoldilocksX4, Mersenne31X16, PrimeCharacteristicRing, SimdField,
    SmallField,
};
use proptest::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use crate::{
    BytesHashTranscript, DIGEST_SIZE, FiatShamirHasher, Keccak256Hasher, PENDING_CAPACITY,
    ProverTranscript, Sha256Hasher, Transcript, TranscriptError, VerifierTranscript,
    grind_prover, grind_verifier,
};

fn challenges_after<H: FiatShamirHasher>(messages: &[&[u8]]) -> Vec<Goldilocks> {
    let mut transcript = BytesHashTranscript::<H>::new(b"test");
    messages
        .iter()
        .map(|msg| {
            transcript.append_bytes(msg).unwrap();
            transcript.challenge()
        })
        .collect()
}

#[test]
fn test_transcript_determinism() {
    let messages: [&[u8]; 3] = [b"alpha", b"", b"gamma"];
    assert_eq!(
        challenges_after::<Keccak256Hasher>(&messages),
        challenges_after::<Keccak256Hasher>(&messages)
    );
    assert_eq!(
        challenges_after::<Sha256Hasher>(&messages),
        challenges_after::<Sha256Hasher>(&messages)
    );
    assert_ne!(
        challenges_after::<Keccak256Hasher>(&messages),
        challenges_after::<Sha256Hasher>(&messages)
    );
}

#[test]
fn test_label_separates_transcripts() {
    let mut a = BytesHashTranscript::<Keccak256Hasher>::new(b"a");
    let mut b = BytesHashTranscript::<Keccak256Hasher>::new(b"b");
    assert_ne!(a.challenge::<Goldilocks>(), b.challenge::<Goldilocks>());
}

proptest! {
    #[test]
    fn prop_single_byte_change_changes_challenge(
        msg in proptest::collection::vec(any::<u8>(), 1..128),
        idx in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut changed = msg.clone();
        let i = idx.index(msg.len());
        changed[i] ^= flip;
        let a = challenges_after::<Keccak256Hasher>(&[&msg]);
        let b = challenges_after::<Keccak256Hasher>(&[&changed]);
        prop_assert_ne!(a, b);
    }
}

#[test]
fn test_challenge_n_matches_sequential_challenges() {
    let mut a = BytesHashTranscript::<Sha256Hasher>::new(b"n");
    let mut b = a.clone();
    let batch: Vec<Goldilocks> = a.challenge_n(5);
    let single = (0..5).map(|_| b.challenge::<Goldilocks>()).collect::<Vec<_>>();
    assert_eq!(batch, single);
    assert_eq!(a.challenge_u64(), b.challenge_u64());
    assert_eq!(a.stat().challenges_drawn, 6);
}

#[test]
fn test_buffer_overflow() {
    let mut transcript = BytesHashTranscript::<Keccak256Hasher>::new(b"overflow");
    let room = PENDING_CAPACITY - DIGEST_SIZE;
    transcript.append_bytes(&vec![7u8; room]).unwrap();
    assert_eq!(
        transcript.append_bytes(&[1]),
        Err(TranscriptError::BufferOverflow {
            pending: PENDING_CAPACITY,
            incoming: 1,
            capacity: PENDING_CAPACITY,
        })
    );
    // squeezing frees the buffer again
    let _: Goldilocks = transcript.challenge();
    transcript.append_bytes(&vec![7u8; room]).unwrap();
}

#[test]
fn test_commitment_never_overflows() {
    let mut transcript = BytesHashTranscript::<Keccak256Hasher>::new(b"commit");
    transcript.append_commitment(&vec![3u8; 10 * PENDING_CAPACITY]).unwrap();
    transcript.append_commitment(&vec![4u8; 10 * PENDING_CAPACITY]).unwrap();
}

#[test]
fn test_proof_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let scalars = (0..3).map(|_| Goldilocks::random(&mut rng)).collect::<Vec<_>>();
    let packed = (0..3).map(|_| Mersenne31X16::random(&mut rng)).collect::<Vec<_>>();
    let commitment = vec![9u8; 1000];

    let mut prover = ProverTranscript::<Keccak256Hasher>::new(b"round trip");
    prover.write_commitment(&commitment).unwrap();
    let c0: Goldilocks = prover.challenge();
    prover.write_field_elements(&scalars).unwrap();
    let c1: Goldilocks = prover.challenge();
    prover.write_field_elements(&packed).unwrap();
    let c2: Goldilocks = prover.challenge();
    prover.write_field_element(&packed[0]).unwrap();
    let proof = prover.finalize();
    assert_eq!(
        proof.len(),
        1000 + 3 * Goldilocks::SIZE_BYTES + 4 * Mersenne31X16::SIZE_BYTES
    );

    let mut verifier = VerifierTranscript::<Keccak256Hasher>::new(b"round trip", &proof);
    assert_eq!(verifier.read_commitment(1000).unwrap(), commitment.as_slice());
    assert_eq!(verifier.challenge::<Goldilocks>(), c0);
    assert_eq!(verifier.read_field_elements::<Goldilocks>(3).unwrap(), scalars);
    assert_eq!(verifier.challenge::<Goldilocks>(), c1);
    assert_eq!(verifier.read_field_elements::<Mersenne31X16>(3).unwrap(), packed);
    assert_eq!(verifier.challenge::<Goldilocks>(), c2);
    assert_eq!(verifier.read_field_element::<Mersenne31X16>().unwrap(), packed[0]);
    assert_eq!(verifier.bytes_consumed(), proof.len());
    verifier.finish().unwrap();
}

#[test]
fn test_truncated_and_trailing() {
    let mut prover = ProverTranscript::<Sha256Hasher>::new(b"t");
    prover.write_field_element(&GoldilocksX4::one()).unwrap();
    let proof = prover.finalize();

    let mut verifier = VerifierTranscript::<Sha256Hasher>::new(b"t", &proof);
    assert_eq!(
        verifier.read_field_elements::<GoldilocksX4>(2),
        Err(TranscriptError::ProofTruncated {
            needed: 64,
            remaining: 32
        })
    );

    let mut verifier = VerifierTranscript::<Sha256Hasher>::new(b"t", &proof);
    verifier.read_field_element::<Goldilocks>().unwrap();
    assert_eq!(
        verifier.finish(),
        Err(TranscriptError::TrailingBytes { remaining: 24 })
    );
}

#[test]
fn test_malformed_element() {
    let mut prover = ProverTranscript::<Keccak256Hasher>::new(b"m");
    prover.write_bytes(&[0u8; 8]).unwrap();
    prover.write_bytes(&[0xff; 8]).unwrap();
    let proof = prover.finalize();

    let mut verifier = VerifierTranscript::<Keccak256Hasher>::new(b"m", &proof);
    assert_eq!(
        verifier.read_field_elements::<Goldilocks>(2),
        Err(TranscriptError::MalformedElement { offset: 8 })
    );
}

#[test]
fn test_grinding() {
    let mut prover = ProverTranscript::<Keccak256Hasher>::new(b"grind");
    prover.write_field_element(&Goldilocks::from_u64(5)).unwrap();
    grind_prover(&mut prover, 4).unwrap();
    let after: Goldilocks = prover.challenge();
    let proof = prover.finalize();
    assert_eq!(proof.len(), 8 + DIGEST_SIZE);

    let mut verifier = VerifierTranscript::<Keccak256Hasher>::new(b"grind", &proof);
    verifier.read_field_element::<Goldilocks>().unwrap();
    grind_verifier(&mut verifier, 4).unwrap();
    assert_eq!(verifier.challenge::<Goldilocks>(), after);
    verifier.finish().unwrap();

    // a different difficulty yields a different result
    let mut verifier = VerifierTranscript::<Keccak256Hasher>::new(b"grind", &proof);
    verifier.read_field_element::<Goldilocks>().unwrap();
    assert_eq!(
        grind_verifier(&mut verifier, 5),
        Err(TranscriptError::GrindingMismatch)
    );
}
