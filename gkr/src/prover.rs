use ff_ext::{PrimeCharacteristicRing, SimdField, SmallField};
use itertools::Itertools;
use multilinear_extensions::{eq_eval_at_index, evaluate_mle};
use sumcheck::{MultilinearProductHelper, entered_span, exit_span};
use transcript::{FiatShamirHasher, ProverTranscript, Transcript};

use crate::{Circuit, CircuitError, Communicator, GkrError, Layer, ScratchPad};

mod layer_helper;

use layer_helper::GkrLayerHelper;

/// The two claims a layer reduction leaves on its input.
///
/// `rx ++ rwx` and `ry ++ rwy` are points on the whole input, the worker
/// coordinates being the high variables. After the last layer these are the
/// points the input commitment is opened at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputClaims<F: SimdField> {
    pub rx: Vec<F::Scalar>,
    pub rwx: Vec<F::Scalar>,
    pub vx: F,
    pub ry: Vec<F::Scalar>,
    pub rwy: Vec<F::Scalar>,
    pub vy: F,
}

impl<F: SimdField> InputClaims<F> {
    pub fn x_point(&self) -> Vec<F::Scalar> {
        [self.rx.as_slice(), &self.rwx].concat()
    }

    pub fn y_point(&self) -> Vec<F::Scalar> {
        [self.ry.as_slice(), &self.rwy].concat()
    }
}

/// Batched claim on the output of a layer: `alpha · V(rz1, rw1) + beta · V(rz2, rw2)`.
#[derive(Clone, Debug)]
pub(crate) struct OutputClaims<Fp> {
    pub(crate) rz1: Vec<Fp>,
    pub(crate) rz2: Vec<Fp>,
    pub(crate) rw1: Vec<Fp>,
    pub(crate) rw2: Vec<Fp>,
    pub(crate) alpha: Fp,
    pub(crate) beta: Fp,
}

impl<Fp: PrimeCharacteristicRing + Copy> OutputClaims<Fp> {
    /// Single claim at `(rz, rw)`; the second slot is the zero point with
    /// weight zero.
    pub(crate) fn single(rz: Vec<Fp>, rw: Vec<Fp>) -> Self {
        Self {
            rz2: vec![Fp::ZERO; rz.len()],
            rw2: vec![Fp::ZERO; rw.len()],
            rz1: rz,
            rw1: rw,
            alpha: Fp::ONE,
            beta: Fp::ZERO,
        }
    }

    pub(crate) fn next<F: SimdField<Scalar = Fp>>(
        claims: &InputClaims<F>,
        alpha: Fp,
        beta: Fp,
    ) -> Self {
        Self {
            rz1: claims.rx.clone(),
            rz2: claims.ry.clone(),
            rw1: claims.rwx.clone(),
            rw2: claims.rwy.clone(),
            alpha,
            beta,
        }
    }
}

/// Sum the local round message over all workers, let the root write it and
/// draw the challenge, and hand the challenge to everyone.
fn exchange_round<F: SimdField, H: FiatShamirHasher, C: Communicator>(
    local: [F; 3],
    transcript: &mut ProverTranscript<H>,
    comm: &C,
) -> Result<F::Scalar, GkrError> {
    let msg = comm.sum_reduce(&local);
    let mut r = vec![];
    if comm.is_root() {
        transcript.write_field_elements(&msg)?;
        r.push(transcript.challenge::<F::Scalar>());
    }
    comm.broadcast(&mut r);
    Ok(r[0])
}

/// Bind the worker variables.
///
/// The root gathers every worker's bound `(V_w, hg_w)`, runs the `lg W`
/// remaining rounds on them and writes `V` at the full point. Every worker
/// gets the worker coordinates and that value back.
fn worker_rounds<F: SimdField, H: FiatShamirHasher, C: Communicator>(
    local: (F, F),
    transcript: &mut ProverTranscript<H>,
    comm: &C,
) -> Result<(Vec<F::Scalar>, F), GkrError> {
    let lg_world_size = comm.lg_world_size();
    let gathered = comm.gather(&[local.0, local.1]);
    let mut rw = Vec::with_capacity(lg_world_size);
    let mut claim = vec![];
    if comm.is_root() {
        let (mut v, mut hg): (Vec<F>, Vec<F>) = gathered.into_iter().tuples().unzip();
        let mut helper = MultilinearProductHelper::prepare(lg_world_size, &mut v, &mut hg, None);
        for var_idx in 0..lg_world_size {
            let msg = helper.round_message(var_idx);
            transcript.write_field_elements(&msg)?;
            let r = transcript.challenge::<F::Scalar>();
            helper.bind(var_idx, &r);
            rw.push(r);
        }
        let value = helper.f_claim();
        transcript.write_field_element(&value)?;
        claim.push(value);
    }
    comm.broadcast(&mut rw);
    comm.broadcast(&mut claim);
    Ok((rw, claim[0]))
}

/// One layer: `input_vars + lg W` rounds over `x`, then as many over `y`.
pub(crate) fn sumcheck_prove_gkr_layer<F: SimdField, H: FiatShamirHasher, C: Communicator>(
    layer: &Layer<F>,
    claims: &OutputClaims<F::Scalar>,
    sp: &mut ScratchPad<F>,
    transcript: &mut ProverTranscript<H>,
    comm: &C,
) -> Result<InputClaims<F>, GkrError> {
    let rank = comm.world_rank();
    let scale1 = claims.alpha * eq_eval_at_index(&claims.rw1, rank);
    let scale2 = claims.beta * eq_eval_at_index(&claims.rw2, rank);

    let mut helper = GkrLayerHelper::new(layer, sp);

    let span = entered_span!("phase x");
    helper.prepare_x_vals(&claims.rz1, &claims.rz2, scale1, scale2);
    for var_idx in 0..layer.input_vars {
        let r = exchange_round(helper.poly_evals_at_rx(var_idx), transcript, comm)?;
        helper.receive_rx(var_idx, r);
    }
    let (rwx, vx) = worker_rounds(helper.x_claims(), transcript, comm)?;
    exit_span!(span);

    let span = entered_span!("phase y");
    let eq_rwx = eq_eval_at_index(&rwx, rank);
    helper.prepare_y_vals(
        &claims.rz1,
        &claims.rz2,
        scale1 * eq_rwx,
        scale2 * eq_rwx,
        vx,
    );
    for var_idx in 0..layer.input_vars {
        let r = exchange_round(helper.poly_evals_at_ry(var_idx), transcript, comm)?;
        helper.receive_ry(var_idx, r);
    }
    let (rwy, vy) = worker_rounds(helper.y_claims(), transcript, comm)?;
    exit_span!(span);

    Ok(InputClaims {
        rx: helper.rx().to_vec(),
        rwx,
        vx,
        ry: helper.ry().to_vec(),
        rwy,
        vy,
    })
}

/// Root-drawn challenges, broadcast to every worker.
fn shared_challenges<Fp: SmallField, H: FiatShamirHasher, C: Communicator>(
    n: usize,
    transcript: &mut ProverTranscript<H>,
    comm: &C,
) -> Vec<Fp> {
    let mut challenges = if comm.is_root() {
        transcript.challenge_n(n)
    } else {
        vec![]
    };
    comm.broadcast(&mut challenges);
    challenges
}

/// Reduce a claim on the output of an evaluated circuit to two claims on its
/// input.
///
/// Returns the claimed output evaluation (meaningful at the root only) and
/// the input claims.
#[tracing::instrument(skip_all, name = "gkr_prove", level = "debug")]
pub fn gkr_prove<F: SimdField, H: FiatShamirHasher, C: Communicator>(
    circuit: &Circuit<F>,
    sp: &mut ScratchPad<F>,
    transcript: &mut ProverTranscript<H>,
    comm: &C,
) -> Result<(F, InputClaims<F>), GkrError> {
    let output_vars = circuit.output_vars();
    let mut rz: Vec<F::Scalar> =
        shared_challenges(output_vars + comm.lg_world_size(), transcript, comm);
    let rw = rz.split_off(output_vars);

    let local_v = evaluate_mle(circuit.output_values(), &rz);
    let claimed_v = comm
        .gather(&[local_v])
        .into_iter()
        .enumerate()
        .map(|(w, v)| v.scale(&eq_eval_at_index(&rw, w)))
        .sum::<F>();

    let mut claims = OutputClaims::single(rz, rw);
    let mut input_claims = None;
    for (i, layer) in circuit.layers.iter().enumerate().rev() {
        tracing::debug!(
            layer = i,
            input_vars = layer.input_vars,
            output_vars = layer.output_vars,
            gates = layer.num_gates(),
            "proving layer"
        );
        let span = entered_span!("layer", layer = i);
        let layer_claims = sumcheck_prove_gkr_layer(layer, &claims, sp, transcript, comm)?;
        exit_span!(span);

        if i > 0 {
            let ab = shared_challenges::<F::Scalar, _, _>(2, transcript, comm);
            claims = OutputClaims::next(&layer_claims, ab[0], ab[1]);
        }
        input_claims = Some(layer_claims);
    }
    let input_claims = input_claims.ok_or(CircuitError::EmptyCircuit)?;
    Ok((claimed_v, input_claims))
}
