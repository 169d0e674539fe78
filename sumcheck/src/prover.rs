use ff_ext::{PrimeCharacteristicRing, SimdField};
use rayon::prelude::*;
use transcript::{FiatShamirHasher, ProverTranscript, Transcript, TranscriptError};

use crate::util::AdditiveArray;

/// Rounds with at least this many live pairs are accumulated with rayon.
pub const PARALLEL_PAIRS_THRESHOLD: usize = 1 << 12;

/// Round-by-round prover for `Σ_x f(x) · g(x)` over `{0,1}^num_vars`.
///
/// The helper only borrows the two evaluation tables; every bind folds them in
/// place, so after round `i` the live range is `2^(num_vars - i - 1)`. When a
/// `gate_exists` bitmap is supplied, pairs where `g` is structurally zero on
/// both halves are skipped.
pub struct MultilinearProductHelper<'a, F: SimdField> {
    num_vars: usize,
    f: &'a mut [F],
    g: &'a mut [F],
    gate_exists: Option<&'a mut [bool]>,
}

impl<'a, F: SimdField> MultilinearProductHelper<'a, F> {
    pub fn prepare(
        num_vars: usize,
        f: &'a mut [F],
        g: &'a mut [F],
        gate_exists: Option<&'a mut [bool]>,
    ) -> Self {
        let size = 1 << num_vars;
        assert!(
            f.len() >= size && g.len() >= size,
            "evaluation tables hold {} / {} entries, {size} needed",
            f.len(),
            g.len()
        );
        if let Some(exists) = &gate_exists {
            assert!(exists.len() >= size, "gate_exists bitmap too small");
        }
        Self {
            num_vars,
            f,
            g,
            gate_exists,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    #[inline(always)]
    fn pair_terms(&self, i: usize) -> AdditiveArray<F, 3> {
        if let Some(exists) = &self.gate_exists {
            if !exists[2 * i] && !exists[2 * i + 1] {
                return AdditiveArray::default();
            }
        }
        let (f0, f1) = (self.f[2 * i], self.f[2 * i + 1]);
        let (g0, g1) = (self.g[2 * i], self.g[2 * i + 1]);
        AdditiveArray([f0 * g0, f1 * g1, (f0 + f1) * (g0 + g1)])
    }

    /// Evaluations at 0, 1, 2 of the round polynomial for variable `var_idx`.
    pub fn round_message(&self, var_idx: usize) -> [F; 3] {
        assert!(var_idx < self.num_vars, "round {var_idx} out of range");
        let pairs = 1 << (self.num_vars - var_idx - 1);
        let AdditiveArray([p0, p1, cross]) = if pairs >= PARALLEL_PAIRS_THRESHOLD {
            (0..pairs)
                .into_par_iter()
                .with_min_len(PARALLEL_PAIRS_THRESHOLD / 8)
                .map(|i| self.pair_terms(i))
                .sum()
        } else {
            (0..pairs).map(|i| self.pair_terms(i)).sum()
        };
        // p(2) = (2 f1 - f0)(2 g1 - g0) = 6 p1 + 3 p0 - 2 Σ (f0 + f1)(g0 + g1)
        let p2 = p1.scale(&F::Scalar::from_u64(6)) + p0.scale(&F::Scalar::from_u64(3))
            - cross.scale(&F::Scalar::TWO);
        [p0, p1, p2]
    }

    /// Fix variable `var_idx` to `r`: `new[i] = old[2i] + r (old[2i + 1] - old[2i])`.
    pub fn bind(&mut self, var_idx: usize, r: &F::Scalar) {
        assert!(var_idx < self.num_vars, "round {var_idx} out of range");
        let half = 1 << (self.num_vars - var_idx - 1);
        for i in 0..half {
            let (f0, f1) = (self.f[2 * i], self.f[2 * i + 1]);
            self.f[i] = f0 + (f1 - f0).scale(r);

            let (g0, g1) = (self.g[2 * i], self.g[2 * i + 1]);
            match self.gate_exists.as_deref_mut() {
                Some(exists) if !exists[2 * i] && !exists[2 * i + 1] => {
                    self.g[i] = F::zero();
                    exists[i] = false;
                }
                Some(exists) => {
                    self.g[i] = g0 + (g1 - g0).scale(r);
                    exists[i] = true;
                }
                None => self.g[i] = g0 + (g1 - g0).scale(r),
            }
        }
    }

    /// `f` at the bound point, meaningful once every variable is fixed.
    pub fn f_claim(&self) -> F {
        self.f[0]
    }

    pub fn g_claim(&self) -> F {
        self.g[0]
    }
}

/// Non-interactive sumcheck for `Σ_x f(x) · g(x)`.
///
/// Returns the challenge point (variable 0 first) together with `f(r)` and
/// `g(r)`. Both tables are folded in place.
#[tracing::instrument(skip_all, name = "sumcheck::prove_product", level = "debug")]
pub fn prove_product_sumcheck<F: SimdField, H: FiatShamirHasher>(
    num_vars: usize,
    f: &mut [F],
    g: &mut [F],
    transcript: &mut ProverTranscript<H>,
) -> Result<(Vec<F::Scalar>, F, F), TranscriptError> {
    let mut helper = MultilinearProductHelper::prepare(num_vars, f, g, None);
    let mut point = Vec::with_capacity(num_vars);
    for var_idx in 0..num_vars {
        let msg = helper.round_message(var_idx);
        transcript.write_field_elements(&msg)?;
        let r = transcript.challenge::<F::Scalar>();
        helper.bind(var_idx, &r);
        point.push(r);
    }
    Ok((point, helper.f_claim(), helper.g_claim()))
}
