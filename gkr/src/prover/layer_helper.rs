use ff_ext::{PrimeCharacteristicRing, SimdField};
use multilinear_extensions::eq_evals_at_with_buf;
use sumcheck::MultilinearProductHelper;

use crate::{Layer, ScratchPad};

/// Prover state of one layer reduction on the local shard.
///
/// Phase 1 runs over `x`, the first input of every gate:
/// `Σ_x V(x) · hg(x)` with `hg(x) = add(rz, x) + Σ_y mul(rz, x, y) · V(y)`.
/// Phase 2 runs over `y` with `hg(y) = V(rx) · mul(rz, rx, y)`.
/// `rz` is the batched output point `scale1 · eq(rz1, ·) + scale2 · eq(rz2, ·)`.
pub(crate) struct GkrLayerHelper<'a, F: SimdField> {
    layer: &'a Layer<F>,
    sp: &'a mut ScratchPad<F>,
    rx: Vec<F::Scalar>,
    ry: Vec<F::Scalar>,
}

impl<'a, F: SimdField> GkrLayerHelper<'a, F> {
    pub(crate) fn new(layer: &'a Layer<F>, sp: &'a mut ScratchPad<F>) -> Self {
        assert!(
            sp.fits(layer),
            "scratch pad too small for a layer with {} input / {} output vars",
            layer.input_vars,
            layer.output_vars
        );
        Self {
            layer,
            sp,
            rx: Vec::with_capacity(layer.input_vars),
            ry: Vec::with_capacity(layer.input_vars),
        }
    }

    fn product_helper(&mut self) -> MultilinearProductHelper<'_, F> {
        let num_vars = self.layer.input_vars;
        let size = 1 << num_vars;
        MultilinearProductHelper::prepare(
            num_vars,
            &mut self.sp.v_evals[..size],
            &mut self.sp.hg_evals[..size],
            Some(&mut self.sp.gate_exists[..size]),
        )
    }

    fn prepare_eq_evals_at_rz(
        &mut self,
        rz1: &[F::Scalar],
        rz2: &[F::Scalar],
        scale1: F::Scalar,
        scale2: F::Scalar,
    ) {
        let size = 1 << self.layer.output_vars;
        let sp = &mut *self.sp;
        eq_evals_at_with_buf(
            rz1,
            scale1,
            &mut sp.eq_evals_at_rz1[..size],
            &mut sp.eq_evals_first_half[..],
            &mut sp.eq_evals_second_half[..],
        );
        eq_evals_at_with_buf(
            rz2,
            scale2,
            &mut sp.eq_evals_at_rz2[..size],
            &mut sp.eq_evals_first_half[..],
            &mut sp.eq_evals_second_half[..],
        );
    }

    fn reset_tables(&mut self) {
        let size = 1 << self.layer.input_vars;
        let sp = &mut *self.sp;
        sp.v_evals[..size].copy_from_slice(&self.layer.input_values);
        sp.hg_evals[..size].fill(F::zero());
        sp.gate_exists[..size].fill(false);
    }

    /// Scatter every gate into `hg[x]`, weighted by the batched `eq` at its
    /// output wire.
    pub(crate) fn prepare_x_vals(
        &mut self,
        rz1: &[F::Scalar],
        rz2: &[F::Scalar],
        scale1: F::Scalar,
        scale2: F::Scalar,
    ) {
        assert_eq!(rz1.len(), self.layer.output_vars);
        assert_eq!(rz2.len(), self.layer.output_vars);
        self.prepare_eq_evals_at_rz(rz1, rz2, scale1, scale2);
        self.reset_tables();
        self.rx.clear();

        let sp = &mut *self.sp;
        for gate in self.layer.mul.iter() {
            let o = gate.idx_out;
            let weight = (sp.eq_evals_at_rz1[o] + sp.eq_evals_at_rz2[o]) * gate.coef.value();
            sp.hg_evals[gate.idx_in1] += sp.v_evals[gate.idx_in2].scale(&weight);
            sp.gate_exists[gate.idx_in1] = true;
        }
        for gate in self.layer.add.iter() {
            let o = gate.idx_out;
            let weight = (sp.eq_evals_at_rz1[o] + sp.eq_evals_at_rz2[o]) * gate.coef.value();
            sp.hg_evals[gate.idx_in] += F::from_scalar(weight);
            sp.gate_exists[gate.idx_in] = true;
        }
    }

    pub(crate) fn poly_evals_at_rx(&mut self, var_idx: usize) -> [F; 3] {
        self.product_helper().round_message(var_idx)
    }

    pub(crate) fn receive_rx(&mut self, var_idx: usize, r: F::Scalar) {
        self.product_helper().bind(var_idx, &r);
        self.rx.push(r);
    }

    /// `(V(rx), hg(rx))` of the local shard once every `x` variable is bound.
    pub(crate) fn x_claims(&self) -> (F, F) {
        (self.sp.v_evals[0], self.sp.hg_evals[0])
    }

    /// Scatter the product gates into `hg[y]`. `rx` is the full `x` point
    /// in local variables and `vx` the value of the whole input at it.
    pub(crate) fn prepare_y_vals(
        &mut self,
        rz1: &[F::Scalar],
        rz2: &[F::Scalar],
        scale1: F::Scalar,
        scale2: F::Scalar,
        vx: F,
    ) {
        assert_eq!(self.rx.len(), self.layer.input_vars, "x phase unfinished");
        self.prepare_eq_evals_at_rz(rz1, rz2, scale1, scale2);
        self.reset_tables();
        self.ry.clear();

        let size = 1 << self.layer.input_vars;
        let sp = &mut *self.sp;
        eq_evals_at_with_buf(
            &self.rx,
            F::Scalar::ONE,
            &mut sp.eq_evals_at_rx[..size],
            &mut sp.eq_evals_first_half[..],
            &mut sp.eq_evals_second_half[..],
        );
        for gate in self.layer.mul.iter() {
            let o = gate.idx_out;
            let weight = (sp.eq_evals_at_rz1[o] + sp.eq_evals_at_rz2[o])
                * sp.eq_evals_at_rx[gate.idx_in1]
                * gate.coef.value();
            sp.hg_evals[gate.idx_in2] += vx.scale(&weight);
            sp.gate_exists[gate.idx_in2] = true;
        }
    }

    pub(crate) fn poly_evals_at_ry(&mut self, var_idx: usize) -> [F; 3] {
        self.product_helper().round_message(var_idx)
    }

    pub(crate) fn receive_ry(&mut self, var_idx: usize, r: F::Scalar) {
        self.product_helper().bind(var_idx, &r);
        self.ry.push(r);
    }

    pub(crate) fn y_claims(&self) -> (F, F) {
        (self.sp.v_evals[0], self.sp.hg_evals[0])
    }

    pub(crate) fn rx(&self) -> &[F::Scalar] {
        &self.rx
    }

    pub(crate) fn ry(&self) -> &[F::Scalar] {
        &self.ry
    }
}
