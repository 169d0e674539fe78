use std::marker::PhantomData;

use ff_ext::{SimdField, SmallField};
use mpcs::PolynomialCommitmentScheme;
use transcript::{
    FiatShamirHasher, Proof, ProverTranscript, VerifierTranscript, grind_prover, grind_verifier,
};

use crate::{
    Circuit, Communicator, GkrConfig, GkrEngine, GkrError, ScratchPad, SingleProcess, gkr_prove,
    gkr_verify,
};

/// Domain separator every proof transcript starts from.
pub const TRANSCRIPT_LABEL: &[u8] = b"gkr layered circuit proof";

type Scalar<E> = <<E as GkrEngine>::Field as SimdField>::Scalar;

pub struct GkrProver<E: GkrEngine> {
    config: GkrConfig,
    _marker: PhantomData<E>,
}

impl<E: GkrEngine> GkrProver<E> {
    pub fn new(config: GkrConfig) -> Result<Self, GkrError> {
        config.validate()?;
        Ok(Self {
            config,
            _marker: PhantomData,
        })
    }

    pub fn config(&self) -> &GkrConfig {
        &self.config
    }

    /// Commit to the input, evaluate and prove `circuit` on this worker's
    /// input shard.
    ///
    /// Returns one claimed output evaluation per repetition and the proof.
    /// Both are only meaningful at the root; other workers get an empty
    /// proof back.
    #[tracing::instrument(
        skip_all,
        name = "GkrProver::prove",
        level = "info",
        fields(rank = comm.world_rank())
    )]
    pub fn prove<C: Communicator>(
        &self,
        circuit: &mut Circuit<E::Field>,
        sp: &mut ScratchPad<E::Field>,
        comm: &C,
    ) -> Result<(Vec<E::Field>, Proof), GkrError> {
        if comm.world_size() != self.config.world_size {
            return Err(GkrError::Config(format!(
                "configured for {} workers, running on {}",
                self.config.world_size,
                comm.world_size()
            )));
        }
        let mut transcript = ProverTranscript::<E::Hasher>::new(TRANSCRIPT_LABEL);

        let full_input = comm.gather(circuit.input_values());
        let pp = E::Pcs::setup(circuit.input_vars() + comm.lg_world_size())?;
        let commitment = if comm.is_root() {
            let commitment = E::Pcs::commit(&pp, &full_input)?;
            E::Pcs::write_commitment(&E::Pcs::get_pure_commitment(&commitment), &mut transcript)?;
            Some(commitment)
        } else {
            None
        };

        circuit.resolve_random_gates(&mut transcript, comm);
        circuit.evaluate();

        if comm.is_root() {
            grind_prover(&mut transcript, self.config.grinding_bits)?;
        }

        let repetitions = self.config.num_repetitions::<Scalar<E>>();
        let mut claimed_v = Vec::with_capacity(repetitions);
        for _ in 0..repetitions {
            let (v, claims) = gkr_prove(circuit, sp, &mut transcript, comm)?;
            if let Some(commitment) = &commitment {
                for (point, eval) in [
                    (claims.x_point(), claims.vx),
                    (claims.y_point(), claims.vy),
                ] {
                    let opening = E::Pcs::open(&pp, &full_input, commitment, &point, &eval)?;
                    E::Pcs::write_proof(&opening, &mut transcript)?;
                }
            }
            claimed_v.push(v);
        }

        if !comm.is_root() {
            return Ok((claimed_v, Proof::default()));
        }
        tracing::info!(
            field = <Scalar<E> as SmallField>::NAME,
            hasher = E::Hasher::NAME,
            repetitions,
            proof_bytes = transcript.proof_len(),
            "proof generated"
        );
        Ok((claimed_v, transcript.finalize()))
    }
}

pub struct GkrVerifier<E: GkrEngine> {
    config: GkrConfig,
    _marker: PhantomData<E>,
}

impl<E: GkrEngine> GkrVerifier<E> {
    pub fn new(config: GkrConfig) -> Result<Self, GkrError> {
        config.validate()?;
        Ok(Self {
            config,
            _marker: PhantomData,
        })
    }

    pub fn config(&self) -> &GkrConfig {
        &self.config
    }

    /// `true` iff `proof` shows that every worker's copy of `circuit`
    /// outputs `claimed_v` (one value per repetition).
    pub fn verify(
        &self,
        circuit: &mut Circuit<E::Field>,
        claimed_v: &[E::Field],
        proof: &Proof,
    ) -> bool {
        match self.try_verify(circuit, claimed_v, proof) {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!(%err, "proof not verifiable");
                false
            }
        }
    }

    /// `Ok(false)` when a check fails, `Err` when the proof or the inputs are
    /// malformed.
    #[tracing::instrument(skip_all, name = "GkrVerifier::verify", level = "info")]
    pub fn try_verify(
        &self,
        circuit: &mut Circuit<E::Field>,
        claimed_v: &[E::Field],
        proof: &Proof,
    ) -> Result<bool, GkrError> {
        match self.check(circuit, claimed_v, proof) {
            Ok(()) => Ok(true),
            Err(err) if err.is_rejection() => {
                tracing::warn!(%err, "proof rejected");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn check(
        &self,
        circuit: &mut Circuit<E::Field>,
        claimed_v: &[E::Field],
        proof: &Proof,
    ) -> Result<(), GkrError> {
        let repetitions = self.config.num_repetitions::<Scalar<E>>();
        if claimed_v.len() != repetitions {
            return Err(GkrError::Config(format!(
                "{} claimed outputs for {repetitions} repetitions",
                claimed_v.len()
            )));
        }
        let lg_world_size = self.config.lg_world_size();
        let mut transcript = VerifierTranscript::<E::Hasher>::new(TRANSCRIPT_LABEL, proof);

        let pp = E::Pcs::setup(circuit.input_vars() + lg_world_size)?;
        let commitment = E::Pcs::read_commitment(&pp, &mut transcript)?;

        circuit.resolve_random_gates(&mut transcript, &SingleProcess);

        grind_verifier(&mut transcript, self.config.grinding_bits)?;

        for (repetition, v) in claimed_v.iter().enumerate() {
            let claims = gkr_verify(circuit, *v, lg_world_size, &mut transcript)?;
            for (point, eval) in [
                (claims.x_point(), claims.vx),
                (claims.y_point(), claims.vy),
            ] {
                let opening = E::Pcs::read_proof(&pp, &mut transcript)?;
                match E::Pcs::verify(&pp, &commitment, &point, &eval, &opening) {
                    Ok(()) => {}
                    Err(mpcs::Error::EvaluationMismatch) => {
                        return Err(GkrError::OpeningRejected { repetition });
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        transcript.finish()?;
        Ok(())
    }
}
