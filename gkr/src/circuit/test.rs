use ff_ext::{Goldilocks, GoldilocksX4, Packed, PrimeCharacteristicRing, SimdField};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use transcript::{Keccak256Hasher, ProverTranscript, Transcript};

use crate::{Circuit, CircuitError, Coefficient, Gate1In, Layer, SingleProcess, SparseConnection};

type F = Packed<Goldilocks, 1>;

fn fixed(v: u64) -> Coefficient<Goldilocks> {
    Coefficient::Fixed(Goldilocks::from_u64(v))
}

fn scalars(values: &[u64]) -> Vec<F> {
    values
        .iter()
        .map(|v| F::from_scalar(Goldilocks::from_u64(*v)))
        .collect()
}

/// out0 = 2 * in0 * in1 + 3, out1 = 5 * in2 + in3 * in3
fn small_circuit() -> Circuit<F> {
    let mut layer = Layer::new(2, 1);
    layer.add_mul(0, 1, 0, fixed(2));
    layer.add_cst(0, fixed(3));
    layer.add_add(2, 1, fixed(5));
    layer.add_mul(3, 3, 1, fixed(1));
    Circuit::new(vec![layer]).unwrap()
}

#[test]
fn test_evaluate() {
    let mut circuit = small_circuit();
    circuit.set_input(scalars(&[4, 6, 7, 9])).unwrap();
    circuit.evaluate();
    assert_eq!(circuit.output_values(), scalars(&[51, 116]).as_slice());
}

#[test]
fn test_evaluate_chains_layers() {
    let mut lower = Layer::new(1, 1);
    lower.add_add(0, 0, fixed(1));
    lower.add_add(1, 0, fixed(1));
    lower.add_mul(0, 1, 1, fixed(1));
    let mut upper = Layer::new(1, 0);
    upper.add_mul(0, 1, 0, fixed(1));
    let mut circuit = Circuit::new(vec![lower, upper]).unwrap();
    circuit.set_input(scalars(&[3, 5])).unwrap();
    circuit.evaluate();
    assert_eq!(circuit.layers[1].input_values, scalars(&[8, 15]));
    assert_eq!(circuit.output_values(), scalars(&[120]).as_slice());
}

#[test]
fn test_validation() {
    assert_eq!(
        Circuit::<F>::new(vec![]).unwrap_err(),
        CircuitError::EmptyCircuit
    );

    let err = Circuit::<F>::new(vec![Layer::new(2, 3), Layer::new(2, 1)]).unwrap_err();
    assert_eq!(
        err,
        CircuitError::LayerShapeMismatch {
            layer: 1,
            expected: 3,
            found: 2
        }
    );

    let mut layer = Layer::<F>::new(2, 1);
    layer.add_mul(0, 4, 1, fixed(1));
    assert_eq!(
        Circuit::new(vec![layer]).unwrap_err(),
        CircuitError::GateIndexOutOfRange {
            layer: 0,
            index: 4,
            num_vars: 2
        }
    );

    let mut layer = Layer::<F>::new(2, 1);
    layer.add_cst(2, fixed(1));
    assert!(matches!(
        Circuit::new(vec![layer]),
        Err(CircuitError::GateIndexOutOfRange { index: 2, num_vars: 1, .. })
    ));

    let mut circuit = small_circuit();
    assert_eq!(
        circuit.set_input(scalars(&[1, 2])).unwrap_err(),
        CircuitError::InputSizeMismatch {
            expected: 4,
            found: 2
        }
    );
}

#[test]
#[should_panic(expected = "before resolve_random_gates")]
fn test_evaluate_unresolved_panics() {
    let mut layer = Layer::<F>::new(1, 1);
    layer.add_add(0, 0, Coefficient::Random);
    let mut circuit = Circuit::new(vec![layer]).unwrap();
    circuit.evaluate();
}

#[test]
fn test_resolve_random_gates_in_collection_order() {
    let mut lower = Layer::<F>::new(1, 1);
    lower.add_mul(0, 1, 0, Coefficient::Random);
    lower.add_add(1, 1, Coefficient::Random);
    lower.add_add(0, 0, fixed(7));
    let mut upper = Layer::<F>::new(1, 1);
    upper.add_cst(0, Coefficient::Random);
    upper.add_mul(0, 0, 1, Coefficient::Random);
    let mut circuit = Circuit::new(vec![lower, upper]).unwrap();
    assert_eq!(circuit.num_random_coefs(), 4);

    let mut transcript = ProverTranscript::<Keccak256Hasher>::new(b"resolve");
    circuit.resolve_random_gates(&mut transcript, &SingleProcess);

    let mut expected = ProverTranscript::<Keccak256Hasher>::new(b"resolve");
    let r = expected.challenge_n::<Goldilocks>(4);
    // layer 0 first, then constant / linear / product gates of each layer
    assert_eq!(circuit.layers[0].add.gates[0].coef, Coefficient::Fixed(r[0]));
    assert_eq!(circuit.layers[0].mul.gates[0].coef, Coefficient::Fixed(r[1]));
    assert_eq!(circuit.layers[1].cst.gates[0].coef, Coefficient::Fixed(r[2]));
    assert_eq!(circuit.layers[1].mul.gates[0].coef, Coefficient::Fixed(r[3]));
    assert_eq!(circuit.layers[0].add.gates[1].coef, fixed(7));
}

#[test]
fn test_replicate_matches_copies() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut circuit = Circuit::<GoldilocksX4>::random(&mut rng, &[3, 2, 2], 0);
    let mut replicated = circuit.replicate(4);
    assert_eq!(replicated.input_vars(), 5);
    assert_eq!(replicated.output_vars(), 4);

    let mut full_input = vec![];
    let mut full_output = vec![];
    for _ in 0..4 {
        let input = (0..8)
            .map(|_| GoldilocksX4::random(&mut rng))
            .collect::<Vec<_>>();
        circuit.set_input(input.clone()).unwrap();
        circuit.evaluate();
        full_input.extend(input);
        full_output.extend_from_slice(circuit.output_values());
    }
    replicated.set_input(full_input).unwrap();
    replicated.evaluate();
    assert_eq!(replicated.output_values(), full_output.as_slice());
}

#[test]
fn test_random_circuit_shape() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let circuit = Circuit::<F>::random(&mut rng, &[2, 3, 4, 5, 5], 2);
    assert_eq!(circuit.layers().len(), 4);
    assert_eq!(circuit.input_vars(), 2);
    assert_eq!(circuit.output_vars(), 5);
    assert_eq!(circuit.max_input_vars(), 5);
    assert_eq!(circuit.num_random_coefs(), 8);
    for layer in circuit.layers() {
        assert_eq!(layer.mul.len(), 1 << layer.output_vars);
    }
}

#[test]
fn test_topology_serde() {
    let mut layer = Layer::<F>::new(2, 2);
    layer.add_add(3, 1, fixed(9));
    layer.add_add(0, 2, Coefficient::Random);

    let json = serde_json::to_string(&layer.add).unwrap();
    let back: SparseConnection<Gate1In<Goldilocks>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layer.add);
    assert!(!back.gates[1].coef.is_resolved());
}
