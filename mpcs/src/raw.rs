use std::marker::PhantomData;

use ff_ext::SimdField;
use multilinear_extensions::evaluate_mle;
use serde::{Deserialize, Serialize};
use transcript::{FiatShamirHasher, ProverTranscript, VerifierTranscript};

use crate::{Error, PolynomialCommitmentScheme};

/// Commitment that carries the whole evaluation table. Opening is free and
/// the verifier re-evaluates the MLE itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawPcs<F>(PhantomData<F>);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParam {
    pub num_vars: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCommitment<F> {
    pub evals: Vec<F>,
}

impl<F: SimdField> PolynomialCommitmentScheme<F> for RawPcs<F> {
    type Param = RawParam;
    type Commitment = RawCommitment<F>;
    type CommitmentWithWitness = RawCommitment<F>;
    type Proof = ();

    fn setup(num_vars: usize) -> Result<Self::Param, Error> {
        Ok(RawParam { num_vars })
    }

    fn commit(pp: &Self::Param, poly: &[F]) -> Result<Self::CommitmentWithWitness, Error> {
        if poly.len() != 1 << pp.num_vars {
            return Err(Error::InvalidPcsParam(format!(
                "poly has {} evaluations, param expects 2^{}",
                poly.len(),
                pp.num_vars
            )));
        }
        Ok(RawCommitment {
            evals: poly.to_vec(),
        })
    }

    fn get_pure_commitment(comm: &Self::CommitmentWithWitness) -> Self::Commitment {
        comm.clone()
    }

    fn write_commitment<H: FiatShamirHasher>(
        comm: &Self::Commitment,
        transcript: &mut ProverTranscript<H>,
    ) -> Result<(), Error> {
        let mut payload = Vec::with_capacity(comm.evals.len() * F::SIZE_BYTES);
        comm.evals.iter().for_each(|v| v.write_bytes(&mut payload));
        transcript.write_commitment(&payload)?;
        Ok(())
    }

    fn read_commitment<H: FiatShamirHasher>(
        pp: &Self::Param,
        transcript: &mut VerifierTranscript<'_, H>,
    ) -> Result<Self::Commitment, Error> {
        let payload = transcript.read_commitment((1 << pp.num_vars) * F::SIZE_BYTES)?;
        let evals = payload
            .chunks_exact(F::SIZE_BYTES)
            .map(F::read_bytes)
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::MalformedCommitment)?;
        Ok(RawCommitment { evals })
    }

    fn open(
        _pp: &Self::Param,
        _poly: &[F],
        _comm: &Self::CommitmentWithWitness,
        _point: &[F::Scalar],
        _eval: &F,
    ) -> Result<Self::Proof, Error> {
        Ok(())
    }

    fn write_proof<H: FiatShamirHasher>(
        _proof: &Self::Proof,
        _transcript: &mut ProverTranscript<H>,
    ) -> Result<(), Error> {
        Ok(())
    }

    fn read_proof<H: FiatShamirHasher>(
        _pp: &Self::Param,
        _transcript: &mut VerifierTranscript<'_, H>,
    ) -> Result<Self::Proof, Error> {
        Ok(())
    }

    fn verify(
        pp: &Self::Param,
        comm: &Self::Commitment,
        point: &[F::Scalar],
        eval: &F,
        _proof: &Self::Proof,
    ) -> Result<(), Error> {
        if point.len() != pp.num_vars {
            return Err(Error::InvalidPcsParam(format!(
                "opening point has {} coordinates, param expects {}",
                point.len(),
                pp.num_vars
            )));
        }
        if evaluate_mle(&comm.evals, point) != *eval {
            tracing::warn!("raw opening rejected");
            return Err(Error::EvaluationMismatch);
        }
        Ok(())
    }
}
