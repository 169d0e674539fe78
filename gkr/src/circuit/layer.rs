use ff_ext::SimdField;
use serde::{Deserialize, Serialize};

use crate::CircuitError;

/// A gate coefficient, either known at construction time or drawn from the
/// transcript once the input is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coefficient<Fp> {
    Fixed(Fp),
    Random,
}

impl<Fp: Copy> Coefficient<Fp> {
    /// Panics on [`Coefficient::Random`]: the circuit has to be resolved
    /// before it is evaluated or proven.
    #[inline(always)]
    pub fn value(&self) -> Fp {
        match self {
            Coefficient::Fixed(c) => *c,
            Coefficient::Random => {
                panic!("gate coefficient used before resolve_random_gates")
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Coefficient::Fixed(_))
    }
}

pub trait Gate {
    type Scalar: Copy;

    fn idx_out(&self) -> usize;

    fn max_idx_in(&self) -> Option<usize>;

    fn coef(&self) -> &Coefficient<Self::Scalar>;

    /// The same gate on the copy whose wires start at the given offsets.
    fn shifted(&self, in_offset: usize, out_offset: usize) -> Self;
}

/// Constant gate: `out[idx_out] += coef`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCIn<Fp> {
    pub idx_out: usize,
    pub coef: Coefficient<Fp>,
}

/// Linear gate: `out[idx_out] += coef * in[idx_in]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate1In<Fp> {
    pub idx_in: usize,
    pub idx_out: usize,
    pub coef: Coefficient<Fp>,
}

/// Product gate: `out[idx_out] += coef * in[idx_in1] * in[idx_in2]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate2In<Fp> {
    pub idx_in1: usize,
    pub idx_in2: usize,
    pub idx_out: usize,
    pub coef: Coefficient<Fp>,
}

impl<Fp: Copy> Gate for GateCIn<Fp> {
    type Scalar = Fp;

    fn idx_out(&self) -> usize {
        self.idx_out
    }

    fn max_idx_in(&self) -> Option<usize> {
        None
    }

    fn coef(&self) -> &Coefficient<Fp> {
        &self.coef
    }

    fn shifted(&self, _in_offset: usize, out_offset: usize) -> Self {
        Self {
            idx_out: self.idx_out + out_offset,
            coef: self.coef,
        }
    }
}

impl<Fp: Copy> Gate for Gate1In<Fp> {
    type Scalar = Fp;

    fn idx_out(&self) -> usize {
        self.idx_out
    }

    fn max_idx_in(&self) -> Option<usize> {
        Some(self.idx_in)
    }

    fn coef(&self) -> &Coefficient<Fp> {
        &self.coef
    }

    fn shifted(&self, in_offset: usize, out_offset: usize) -> Self {
        Self {
            idx_in: self.idx_in + in_offset,
            idx_out: self.idx_out + out_offset,
            coef: self.coef,
        }
    }
}

impl<Fp: Copy> Gate for Gate2In<Fp> {
    type Scalar = Fp;

    fn idx_out(&self) -> usize {
        self.idx_out
    }

    fn max_idx_in(&self) -> Option<usize> {
        Some(self.idx_in1.max(self.idx_in2))
    }

    fn coef(&self) -> &Coefficient<Fp> {
        &self.coef
    }

    fn shifted(&self, in_offset: usize, out_offset: usize) -> Self {
        Self {
            idx_in1: self.idx_in1 + in_offset,
            idx_in2: self.idx_in2 + in_offset,
            idx_out: self.idx_out + out_offset,
            coef: self.coef,
        }
    }
}

/// The gates of one kind in a layer. Order only matters for the order in
/// which random coefficients are resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseConnection<G> {
    pub gates: Vec<G>,
}

impl<G> Default for SparseConnection<G> {
    fn default() -> Self {
        Self { gates: vec![] }
    }
}

impl<G> SparseConnection<G> {
    pub fn push(&mut self, gate: G) {
        self.gates.push(gate);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.gates.iter()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    fn validate(
        &self,
        layer: usize,
        input_vars: usize,
        output_vars: usize,
    ) -> Result<(), CircuitError>
    where
        G: Gate,
    {
        for gate in &self.gates {
            if gate.idx_out() >= 1 << output_vars {
                return Err(CircuitError::GateIndexOutOfRange {
                    layer,
                    index: gate.idx_out(),
                    num_vars: output_vars,
                });
            }
            if let Some(index) = gate.max_idx_in().filter(|i| *i >= 1 << input_vars) {
                return Err(CircuitError::GateIndexOutOfRange {
                    layer,
                    index,
                    num_vars: input_vars,
                });
            }
        }
        Ok(())
    }
}

/// One layer: a dense input and output table joined by sparse gates.
#[derive(Clone, Debug)]
pub struct Layer<F: SimdField> {
    pub input_vars: usize,
    pub output_vars: usize,
    pub input_values: Vec<F>,
    pub output_values: Vec<F>,
    pub cst: SparseConnection<GateCIn<F::Scalar>>,
    pub add: SparseConnection<Gate1In<F::Scalar>>,
    pub mul: SparseConnection<Gate2In<F::Scalar>>,
}

impl<F: SimdField> Layer<F> {
    pub fn new(input_vars: usize, output_vars: usize) -> Self {
        Self {
            input_vars,
            output_vars,
            input_values: vec![F::zero(); 1 << input_vars],
            output_values: vec![F::zero(); 1 << output_vars],
            cst: SparseConnection::default(),
            add: SparseConnection::default(),
            mul: SparseConnection::default(),
        }
    }

    pub fn add_cst(&mut self, idx_out: usize, coef: Coefficient<F::Scalar>) {
        self.cst.push(GateCIn { idx_out, coef });
    }

    pub fn add_add(&mut self, idx_in: usize, idx_out: usize, coef: Coefficient<F::Scalar>) {
        self.add.push(Gate1In {
            idx_in,
            idx_out,
            coef,
        });
    }

    pub fn add_mul(
        &mut self,
        idx_in1: usize,
        idx_in2: usize,
        idx_out: usize,
        coef: Coefficient<F::Scalar>,
    ) {
        self.mul.push(Gate2In {
            idx_in1,
            idx_in2,
            idx_out,
            coef,
        });
    }

    pub fn num_gates(&self) -> usize {
        self.cst.len() + self.add.len() + self.mul.len()
    }

    pub(crate) fn validate(&self, layer: usize) -> Result<(), CircuitError> {
        self.cst.validate(layer, self.input_vars, self.output_vars)?;
        self.add.validate(layer, self.input_vars, self.output_vars)?;
        self.mul.validate(layer, self.input_vars, self.output_vars)
    }

    /// Recompute `output_values` from `input_values`.
    pub fn evaluate(&mut self) {
        let input = &self.input_values;
        let output = &mut self.output_values;
        output.fill(F::zero());
        for gate in self.mul.iter() {
            output[gate.idx_out] +=
                (input[gate.idx_in1] * input[gate.idx_in2]).scale(&gate.coef.value());
        }
        for gate in self.add.iter() {
            output[gate.idx_out] += input[gate.idx_in].scale(&gate.coef.value());
        }
        for gate in self.cst.iter() {
            output[gate.idx_out] += F::from_scalar(gate.coef.value());
        }
    }
}
