use ff_ext::{PrimeCharacteristicRing, SimdField};
use multilinear_extensions::{build_eq_x_r_vec, eq3_eval, eq_eval};
use sumcheck::{SumcheckError, verify_sumcheck_round};
use transcript::{FiatShamirHasher, Transcript, VerifierTranscript};

use crate::{Circuit, CircuitError, GkrError, InputClaims, Layer, prover::OutputClaims};

fn layer_error(layer: usize, err: SumcheckError) -> GkrError {
    match err {
        SumcheckError::Transcript(err) => err.into(),
        SumcheckError::RoundMismatch { round } => GkrError::SumcheckRoundMismatch { layer, round },
    }
}

/// Run `num_rounds` rounds numbered from `first_round`, returning the challenges.
fn verify_rounds<F: SimdField, H: FiatShamirHasher>(
    layer: usize,
    first_round: usize,
    num_rounds: usize,
    claim: &mut F,
    transcript: &mut VerifierTranscript<'_, H>,
) -> Result<Vec<F::Scalar>, GkrError> {
    (first_round..first_round + num_rounds)
        .map(|round| {
            verify_sumcheck_round(transcript, claim, round).map_err(|e| layer_error(layer, e))
        })
        .collect()
}

/// Check one layer reduction of `alpha · v1 + beta · v2` and return the two
/// claims it leaves on the layer input.
///
/// The wiring polynomials are evaluated here from the sparse gates; nothing
/// but the round messages and the two input values is taken from the proof.
pub(crate) fn sumcheck_verify_gkr_layer<F: SimdField, H: FiatShamirHasher>(
    layer_idx: usize,
    layer: &Layer<F>,
    claims: &OutputClaims<F::Scalar>,
    v1: F,
    v2: F,
    lg_world_size: usize,
    transcript: &mut VerifierTranscript<'_, H>,
) -> Result<InputClaims<F>, GkrError> {
    let OutputClaims {
        rz1,
        rz2,
        rw1,
        rw2,
        alpha,
        beta,
    } = claims;
    let (alpha, beta) = (*alpha, *beta);
    let eq_rz1 = build_eq_x_r_vec(rz1);
    let eq_rz2 = build_eq_x_r_vec(rz2);

    // the constant gates of every worker sum to one copy: Σ_w eq(rw, w) = 1
    let cst = layer.cst.iter().fold(F::Scalar::ZERO, |acc, gate| {
        let o = gate.idx_out;
        acc + gate.coef.value() * (alpha * eq_rz1[o] + beta * eq_rz2[o])
    });
    let mut claim = v1.scale(&alpha) + v2.scale(&beta) - F::from_scalar(cst);

    let num_rounds = layer.input_vars + lg_world_size;
    let mut rx = verify_rounds(layer_idx, 0, num_rounds, &mut claim, transcript)?;
    let rwx = rx.split_off(layer.input_vars);
    let vx: F = transcript.read_field_element()?;

    let eq_rx = build_eq_x_r_vec(&rx);
    let (wx1, wx2) = (alpha * eq_eval(rw1, &rwx), beta * eq_eval(rw2, &rwx));
    let add = layer.add.iter().fold(F::Scalar::ZERO, |acc, gate| {
        let o = gate.idx_out;
        acc + gate.coef.value() * eq_rx[gate.idx_in] * (wx1 * eq_rz1[o] + wx2 * eq_rz2[o])
    });
    claim -= vx.scale(&add);

    let mut ry = verify_rounds(layer_idx, num_rounds, num_rounds, &mut claim, transcript)?;
    let rwy = ry.split_off(layer.input_vars);
    let vy: F = transcript.read_field_element()?;

    let eq_ry = build_eq_x_r_vec(&ry);
    let (wy1, wy2) = (
        alpha * eq3_eval(rw1, &rwx, &rwy),
        beta * eq3_eval(rw2, &rwx, &rwy),
    );
    let mul = layer.mul.iter().fold(F::Scalar::ZERO, |acc, gate| {
        let o = gate.idx_out;
        acc + gate.coef.value()
            * eq_rx[gate.idx_in1]
            * eq_ry[gate.idx_in2]
            * (wy1 * eq_rz1[o] + wy2 * eq_rz2[o])
    });
    claim -= (vx * vy).scale(&mul);

    if !claim.is_zero() {
        tracing::warn!(layer = layer_idx, "layer residual is not zero");
        return Err(GkrError::ResidualNonZero { layer: layer_idx });
    }
    Ok(InputClaims {
        rx,
        rwx,
        vx,
        ry,
        rwy,
        vy,
    })
}

/// Verifier side of [`crate::gkr_prove`] for a proof made by `2^lg_world_size`
/// workers, each holding `circuit`.
///
/// Returns the claims the input commitment still has to be opened against.
#[tracing::instrument(skip_all, name = "gkr_verify", level = "debug")]
pub fn gkr_verify<F: SimdField, H: FiatShamirHasher>(
    circuit: &Circuit<F>,
    claimed_v: F,
    lg_world_size: usize,
    transcript: &mut VerifierTranscript<'_, H>,
) -> Result<InputClaims<F>, GkrError> {
    let output_vars = circuit.output_vars();
    let mut rz = transcript.challenge_n::<F::Scalar>(output_vars + lg_world_size);
    let rw = rz.split_off(output_vars);

    let mut claims = OutputClaims::single(rz, rw);
    let (mut v1, mut v2) = (claimed_v, F::zero());
    let mut input_claims = None;
    for (i, layer) in circuit.layers.iter().enumerate().rev() {
        let layer_claims =
            sumcheck_verify_gkr_layer(i, layer, &claims, v1, v2, lg_world_size, transcript)?;
        tracing::debug!(layer = i, "layer verified");
        if i > 0 {
            let ab = transcript.challenge_n::<F::Scalar>(2);
            claims = OutputClaims::next(&layer_claims, ab[0], ab[1]);
            (v1, v2) = (layer_claims.vx, layer_claims.vy);
        }
        input_claims = Some(layer_claims);
    }
    input_claims.ok_or(GkrError::Circuit(CircuitError::EmptyCircuit))
}
