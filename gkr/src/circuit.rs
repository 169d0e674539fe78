use ff_ext::{SimdField, SmallField};
use rand_core::RngCore;
use transcript::Transcript;

use crate::{CircuitError, Communicator};

mod layer;

pub use layer::{Coefficient, Gate, Gate1In, Gate2In, GateCIn, Layer, SparseConnection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateKind {
    Cst,
    Add,
    Mul,
}

/// Position of a gate whose coefficient is drawn from the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CoefRef {
    layer: usize,
    kind: GateKind,
    index: usize,
}

/// Layered circuit, layer 0 nearest the input.
#[derive(Clone, Debug)]
pub struct Circuit<F: SimdField> {
    pub(crate) layers: Vec<Layer<F>>,
    rnd_coefs: Vec<CoefRef>,
}

fn collect_random_coefs<F: SimdField>(layers: &[Layer<F>]) -> Vec<CoefRef> {
    fn pending<G: Gate>(
        gates: &SparseConnection<G>,
        layer: usize,
        kind: GateKind,
    ) -> impl Iterator<Item = CoefRef> + '_ {
        gates
            .iter()
            .enumerate()
            .filter(|(_, gate)| !gate.coef().is_resolved())
            .map(move |(index, _)| CoefRef { layer, kind, index })
    }

    layers
        .iter()
        .enumerate()
        .flat_map(|(i, layer)| {
            pending(&layer.cst, i, GateKind::Cst)
                .chain(pending(&layer.add, i, GateKind::Add))
                .chain(pending(&layer.mul, i, GateKind::Mul))
        })
        .collect()
}

impl<F: SimdField> Circuit<F> {
    pub fn new(layers: Vec<Layer<F>>) -> Result<Self, CircuitError> {
        if layers.is_empty() {
            return Err(CircuitError::EmptyCircuit);
        }
        for (i, layer) in layers.iter().enumerate() {
            if i > 0 && layer.input_vars != layers[i - 1].output_vars {
                return Err(CircuitError::LayerShapeMismatch {
                    layer: i,
                    expected: layers[i - 1].output_vars,
                    found: layer.input_vars,
                });
            }
            layer.validate(i)?;
        }
        let rnd_coefs = collect_random_coefs(&layers);
        Ok(Self { layers, rnd_coefs })
    }

    /// Layers in evaluation order. Topology is fixed once the circuit is
    /// built.
    pub fn layers(&self) -> &[Layer<F>] {
        &self.layers
    }

    pub fn input_vars(&self) -> usize {
        self.layers[0].input_vars
    }

    pub fn output_vars(&self) -> usize {
        self.layers[self.layers.len() - 1].output_vars
    }

    pub fn max_input_vars(&self) -> usize {
        self.layers.iter().map(|l| l.input_vars).max().unwrap_or(0)
    }

    pub fn max_output_vars(&self) -> usize {
        self.layers.iter().map(|l| l.output_vars).max().unwrap_or(0)
    }

    pub fn num_random_coefs(&self) -> usize {
        self.rnd_coefs.len()
    }

    pub fn set_input(&mut self, values: Vec<F>) -> Result<(), CircuitError> {
        let expected = 1 << self.input_vars();
        if values.len() != expected {
            return Err(CircuitError::InputSizeMismatch {
                expected,
                found: values.len(),
            });
        }
        self.layers[0].input_values = values;
        Ok(())
    }

    pub fn input_values(&self) -> &[F] {
        &self.layers[0].input_values
    }

    pub fn output_values(&self) -> &[F] {
        &self.layers[self.layers.len() - 1].output_values
    }

    fn coef_mut(&mut self, at: CoefRef) -> &mut Coefficient<F::Scalar> {
        let layer = &mut self.layers[at.layer];
        match at.kind {
            GateKind::Cst => &mut layer.cst.gates[at.index].coef,
            GateKind::Add => &mut layer.add.gates[at.index].coef,
            GateKind::Mul => &mut layer.mul.gates[at.index].coef,
        }
    }

    /// Fill every random coefficient with a fresh challenge, in collection
    /// order. Only the root draws; the values are broadcast to the workers.
    pub fn resolve_random_gates<T: Transcript, C: Communicator>(
        &mut self,
        transcript: &mut T,
        comm: &C,
    ) {
        let mut coefs: Vec<F::Scalar> = if comm.is_root() {
            transcript.challenge_n(self.rnd_coefs.len())
        } else {
            vec![]
        };
        comm.broadcast(&mut coefs);
        for (at, coef) in self.rnd_coefs.clone().into_iter().zip(coefs) {
            *self.coef_mut(at) = Coefficient::Fixed(coef);
        }
    }

    /// Propagate the input through every layer.
    #[tracing::instrument(skip_all, name = "Circuit::evaluate", level = "debug")]
    pub fn evaluate(&mut self) {
        let num_layers = self.layers.len();
        for i in 0..num_layers {
            self.layers[i].evaluate();
            if i + 1 < num_layers {
                let (lower, upper) = self.layers.split_at_mut(i + 1);
                upper[0]
                    .input_values
                    .copy_from_slice(&lower[i].output_values);
            }
        }
    }

    /// Random circuit with `var_counts[i]` input vars at layer `i` and
    /// `var_counts[last]` output vars.
    ///
    /// Every output wire gets one product gate and one linear gate, every
    /// fourth one a constant, and each layer `random_coefs_per_layer` extra
    /// linear gates whose coefficient is left to the transcript.
    pub fn random<R: RngCore>(
        rng: &mut R,
        var_counts: &[usize],
        random_coefs_per_layer: usize,
    ) -> Self {
        assert!(var_counts.len() >= 2, "a circuit needs at least one layer");
        let layers = var_counts
            .windows(2)
            .map(|vars| {
                let (input_vars, output_vars) = (vars[0], vars[1]);
                let mut layer = Layer::<F>::new(input_vars, output_vars);
                for o in 0..1 << output_vars {
                    let (i1, i2) = (random_wire(rng, input_vars), random_wire(rng, input_vars));
                    layer.add_mul(i1, i2, o, Coefficient::Fixed(F::Scalar::random(rng)));
                    let i = random_wire(rng, input_vars);
                    layer.add_add(i, o, Coefficient::Fixed(F::Scalar::random(rng)));
                    if o % 4 == 0 {
                        layer.add_cst(o, Coefficient::Fixed(F::Scalar::random(rng)));
                    }
                }
                for _ in 0..random_coefs_per_layer {
                    let (i, o) = (random_wire(rng, input_vars), random_wire(rng, output_vars));
                    layer.add_add(i, o, Coefficient::Random);
                }
                layer
            })
            .collect::<Vec<_>>();
        let rnd_coefs = collect_random_coefs(&layers);
        Self { layers, rnd_coefs }
    }

    /// Side-by-side copies of this circuit, the copy index becoming the
    /// `lg copies` highest variables of every layer. Input values are not
    /// copied. Unresolved coefficients stay unresolved in every copy.
    pub fn replicate(&self, copies: usize) -> Self {
        assert!(copies.is_power_of_two(), "copies must be a power of two");
        let lg = copies.trailing_zeros() as usize;
        let layers = self
            .layers
            .iter()
            .map(|layer| {
                let mut replicated =
                    Layer::<F>::new(layer.input_vars + lg, layer.output_vars + lg);
                for copy in 0..copies {
                    let (in_off, out_off) = (copy << layer.input_vars, copy << layer.output_vars);
                    replicated
                        .cst
                        .gates
                        .extend(layer.cst.iter().map(|g| g.shifted(in_off, out_off)));
                    replicated
                        .add
                        .gates
                        .extend(layer.add.iter().map(|g| g.shifted(in_off, out_off)));
                    replicated
                        .mul
                        .gates
                        .extend(layer.mul.iter().map(|g| g.shifted(in_off, out_off)));
                }
                replicated
            })
            .collect::<Vec<_>>();
        let rnd_coefs = collect_random_coefs(&layers);
        Self { layers, rnd_coefs }
    }
}

fn random_wire<R: RngCore>(rng: &mut R, num_vars: usize) -> usize {
    (rng.next_u64() % (1u64 << num_vars)) as usize
}

#[cfg(test)]
mod test;
