use ff_ext::{PrimeCharacteristicRing, SimdField};

use crate::{Circuit, Layer};

/// Working memory of one prover run, sized once for the largest layer and
/// reused by every layer and both sumcheck phases.
#[derive(Clone, Debug)]
pub struct ScratchPad<F: SimdField> {
    pub(crate) v_evals: Box<[F]>,
    pub(crate) hg_evals: Box<[F]>,
    pub(crate) gate_exists: Box<[bool]>,

    pub(crate) eq_evals_at_rx: Box<[F::Scalar]>,
    pub(crate) eq_evals_at_rz1: Box<[F::Scalar]>,
    pub(crate) eq_evals_at_rz2: Box<[F::Scalar]>,
    pub(crate) eq_evals_first_half: Box<[F::Scalar]>,
    pub(crate) eq_evals_second_half: Box<[F::Scalar]>,

    max_input_vars: usize,
    max_output_vars: usize,
}

impl<F: SimdField> ScratchPad<F> {
    pub fn new(circuit: &Circuit<F>) -> Self {
        let max_input_vars = circuit.max_input_vars();
        let max_output_vars = circuit.max_output_vars();
        let input_size = 1 << max_input_vars;
        let output_size = 1 << max_output_vars;
        let half_size = 1 << max_input_vars.max(max_output_vars).div_ceil(2);
        Self {
            v_evals: vec![F::zero(); input_size].into_boxed_slice(),
            hg_evals: vec![F::zero(); input_size].into_boxed_slice(),
            gate_exists: vec![false; input_size].into_boxed_slice(),
            eq_evals_at_rx: vec![F::Scalar::ZERO; input_size].into_boxed_slice(),
            eq_evals_at_rz1: vec![F::Scalar::ZERO; output_size].into_boxed_slice(),
            eq_evals_at_rz2: vec![F::Scalar::ZERO; output_size].into_boxed_slice(),
            eq_evals_first_half: vec![F::Scalar::ZERO; half_size].into_boxed_slice(),
            eq_evals_second_half: vec![F::Scalar::ZERO; half_size].into_boxed_slice(),
            max_input_vars,
            max_output_vars,
        }
    }

    pub fn fits(&self, layer: &Layer<F>) -> bool {
        layer.input_vars <= self.max_input_vars && layer.output_vars <= self.max_output_vars
    }
}
