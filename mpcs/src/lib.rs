use std::fmt::Debug;

use ff_ext::SimdField;
use transcript::{FiatShamirHasher, ProverTranscript, VerifierTranscript};

mod error;
mod raw;

pub use error::Error;
pub use raw::{RawCommitment, RawParam, RawPcs};

/// Commitment to the input layer of a circuit, opened at the points the GKR
/// reduction ends on. Points are little-endian in the variables, matching the
/// layout of the committed evaluation table.
pub trait PolynomialCommitmentScheme<F: SimdField> {
    type Param: Clone + Debug;
    type Commitment: Clone + Debug;
    type CommitmentWithWitness: Clone + Debug;
    type Proof: Clone + Debug;

    fn setup(num_vars: usize) -> Result<Self::Param, Error>;

    fn commit(pp: &Self::Param, poly: &[F]) -> Result<Self::CommitmentWithWitness, Error>;

    fn get_pure_commitment(comm: &Self::CommitmentWithWitness) -> Self::Commitment;

    fn write_commitment<H: FiatShamirHasher>(
        comm: &Self::Commitment,
        transcript: &mut ProverTranscript<H>,
    ) -> Result<(), Error>;

    fn read_commitment<H: FiatShamirHasher>(
        pp: &Self::Param,
        transcript: &mut VerifierTranscript<'_, H>,
    ) -> Result<Self::Commitment, Error>;

    fn open(
        pp: &Self::Param,
        poly: &[F],
        comm: &Self::CommitmentWithWitness,
        point: &[F::Scalar],
        eval: &F,
    ) -> Result<Self::Proof, Error>;

    fn write_proof<H: FiatShamirHasher>(
        proof: &Self::Proof,
        transcript: &mut ProverTranscript<H>,
    ) -> Result<(), Error>;

    fn read_proof<H: FiatShamirHasher>(
        pp: &Self::Param,
        transcript: &mut VerifierTranscript<'_, H>,
    ) -> Result<Self::Proof, Error>;

    fn verify(
        pp: &Self::Param,
        comm: &Self::Commitment,
        point: &[F::Scalar],
        eval: &F,
        proof: &Self::Proof,
    ) -> Result<(), Error>;
}

#[cfg(test)]
mod test;
