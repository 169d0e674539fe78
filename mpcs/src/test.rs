use ff_ext::{BabyBear, BabyBearX8, SimdField, SmallField};
use multilinear_extensions::evaluate_mle;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use transcript::{ProverTranscript, Sha256Hasher, TranscriptError, VerifierTranscript};

use crate::{Error, PolynomialCommitmentScheme, RawPcs};

type Pcs = RawPcs<BabyBearX8>;

#[test]
fn test_raw_commit_open_verify() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let num_vars = 5;
    let poly = (0..1 << num_vars)
        .map(|_| BabyBearX8::random(&mut rng))
        .collect::<Vec<_>>();
    let point = (0..num_vars)
        .map(|_| BabyBear::random(&mut rng))
        .collect::<Vec<_>>();
    let eval = evaluate_mle(&poly, &point);

    let pp = Pcs::setup(num_vars).unwrap();
    let comm = Pcs::commit(&pp, &poly).unwrap();
    let mut prover = ProverTranscript::<Sha256Hasher>::new(b"pcs");
    Pcs::write_commitment(&Pcs::get_pure_commitment(&comm), &mut prover).unwrap();
    let opening = Pcs::open(&pp, &poly, &comm, &point, &eval).unwrap();
    Pcs::write_proof(&opening, &mut prover).unwrap();
    let proof = prover.finalize();

    let mut verifier = VerifierTranscript::<Sha256Hasher>::new(b"pcs", &proof);
    let read = Pcs::read_commitment(&pp, &mut verifier).unwrap();
    let opening = Pcs::read_proof(&pp, &mut verifier).unwrap();
    verifier.finish().unwrap();
    assert_eq!(read, comm);
    Pcs::verify(&pp, &read, &point, &eval, &opening).unwrap();

    let wrong = eval + BabyBearX8::one();
    assert_eq!(
        Pcs::verify(&pp, &read, &point, &wrong, &opening),
        Err(Error::EvaluationMismatch)
    );
}

#[test]
fn test_raw_commit_size_checks() {
    let pp = Pcs::setup(3).unwrap();
    assert!(matches!(
        Pcs::commit(&pp, &[BabyBearX8::zero(); 4]),
        Err(Error::InvalidPcsParam(_))
    ));

    let comm = Pcs::commit(&pp, &[BabyBearX8::zero(); 8]).unwrap();
    let mut prover = ProverTranscript::<Sha256Hasher>::new(b"pcs");
    Pcs::write_commitment(&comm, &mut prover).unwrap();
    let proof = prover.finalize();

    let larger = Pcs::setup(4).unwrap();
    let mut verifier = VerifierTranscript::<Sha256Hasher>::new(b"pcs", &proof);
    assert_eq!(
        Pcs::read_commitment(&larger, &mut verifier),
        Err(Error::Transcript(TranscriptError::ProofTruncated {
            needed: 16 * 32,
            remaining: 8 * 32
        }))
    );
}
