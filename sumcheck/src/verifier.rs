use ff_ext::{Field, PrimeCharacteristicRing, SimdField};
use transcript::{FiatShamirHasher, Transcript, VerifierTranscript};

use crate::SumcheckError;

/// Evaluate at `r` the quadratic given by its values at 0, 1 and 2:
/// `c0 + (c2 r + c1) r` with `c2 = (p2 - 2 p1 + p0) / 2`.
#[inline]
pub fn degree_2_eval<F: SimdField>(p: &[F; 3], r: &F::Scalar) -> F {
    let [p0, p1, p2] = *p;
    let c0 = p0;
    let c2 = (p2 - p1 - p1 + p0).scale(&F::Scalar::TWO.inverse());
    let c1 = p1 - p0 - c2;
    c0 + (c2.scale(r) + c1).scale(r)
}

/// Read one round message, check it against `claim`, draw the round
/// challenge and move `claim` to `p(r)`.
pub fn verify_sumcheck_round<F: SimdField, H: FiatShamirHasher>(
    transcript: &mut VerifierTranscript<'_, H>,
    claim: &mut F,
    round: usize,
) -> Result<F::Scalar, SumcheckError> {
    let msg: [F; 3] = [
        transcript.read_field_element()?,
        transcript.read_field_element()?,
        transcript.read_field_element()?,
    ];
    if msg[0] + msg[1] != *claim {
        tracing::warn!(round, "sumcheck round rejected");
        return Err(SumcheckError::RoundMismatch { round });
    }
    let r = transcript.challenge::<F::Scalar>();
    *claim = degree_2_eval(&msg, &r);
    Ok(r)
}

/// Verifier side of [`crate::prove_product_sumcheck`].
///
/// Returns the challenge point and the reduced claim, which the caller still
/// has to compare against `f(r) · g(r)`.
pub fn verify_product_sumcheck<F: SimdField, H: FiatShamirHasher>(
    num_vars: usize,
    claimed_sum: F,
    transcript: &mut VerifierTranscript<'_, H>,
) -> Result<(Vec<F::Scalar>, F), SumcheckError> {
    let mut claim = claimed_sum;
    let point = (0..num_vars)
        .map(|round| verify_sumcheck_round(transcript, &mut claim, round))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((point, claim))
}
