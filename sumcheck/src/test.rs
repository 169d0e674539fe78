use ff_ext::{
    BabyBear, Field, Goldilocks, GoldilocksX4, Packed, PrimeCharacteristicRing, SimdField,
    SmallField,
};
use multilinear_extensions::{evaluate_mle, fix_low_variable_in_place};
use proptest::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use transcript::{Keccak256Hasher, ProverTranscript, Sha256Hasher, VerifierTranscript};

use crate::{
    MultilinearProductHelper, SumcheckError, degree_2_eval, prove_product_sumcheck,
    verify_product_sumcheck,
};

fn random_table<F: SimdField>(rng: &mut ChaCha8Rng, num_vars: usize) -> Vec<F> {
    (0..1 << num_vars).map(|_| F::random(rng)).collect()
}

fn lagrange_degree_2<F: Field>(p: [F; 3], r: F) -> F {
    let two = F::TWO.inverse();
    p[0] * (r - F::ONE) * (r - F::TWO) * two - p[1] * r * (r - F::TWO)
        + p[2] * r * (r - F::ONE) * two
}

proptest! {
    #[test]
    fn prop_degree_2_eval_matches_lagrange(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = [
            GoldilocksX4::random(&mut rng),
            GoldilocksX4::random(&mut rng),
            GoldilocksX4::random(&mut rng),
        ];
        for _ in 0..100 {
            let r = Goldilocks::random(&mut rng);
            let lanes = degree_2_eval(&p, &r).unpack();
            for (lane, value) in lanes.into_iter().enumerate() {
                let expected = lagrange_degree_2([p[0].0[lane], p[1].0[lane], p[2].0[lane]], r);
                prop_assert_eq!(value, expected);
            }
        }
    }
}

#[test]
fn test_degree_2_eval_at_interpolation_nodes() {
    let p = [
        Packed([BabyBear::from_u64(5)]),
        Packed([BabyBear::from_u64(9)]),
        Packed([BabyBear::from_u64(17)]),
    ];
    for (i, expected) in p.iter().enumerate() {
        assert_eq!(degree_2_eval(&p, &BabyBear::from_u64(i as u64)), *expected);
    }
}

/// Sum of `f · g` after fixing variable 0 of both tables to `t`.
fn folded_sum<F: SimdField>(f: &[F], g: &[F], num_vars: usize, t: F::Scalar) -> F {
    let (mut f, mut g) = (f.to_vec(), g.to_vec());
    fix_low_variable_in_place(&mut f, num_vars, &t);
    fix_low_variable_in_place(&mut g, num_vars, &t);
    let half = 1 << (num_vars - 1);
    f[..half].iter().zip(&g[..half]).map(|(a, b)| *a * *b).sum()
}

fn check_round_message<F: SimdField>(num_vars: usize, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let f = random_table::<F>(&mut rng, num_vars);
    let g = random_table::<F>(&mut rng, num_vars);
    let (mut f_buf, mut g_buf) = (f.clone(), g.clone());
    let helper = MultilinearProductHelper::prepare(num_vars, &mut f_buf, &mut g_buf, None);
    let msg = helper.round_message(0);
    for (t, value) in msg.iter().enumerate() {
        let expected = folded_sum(&f, &g, num_vars, F::Scalar::from_u64(t as u64));
        assert_eq!(*value, expected, "p({t}) mismatch");
    }
}

#[test]
fn test_round_message_matches_folding() {
    check_round_message::<GoldilocksX4>(5, 1);
    check_round_message::<Packed<BabyBear, 8>>(1, 2);
}

#[test]
fn test_round_message_parallel_path() {
    // 2^14 entries gives 2^13 pairs, above the rayon threshold
    check_round_message::<Packed<BabyBear, 1>>(14, 3);
}

#[test]
fn test_gate_exists_does_not_change_result() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let num_vars = 6;
    let f = random_table::<GoldilocksX4>(&mut rng, num_vars);
    let mut g = random_table::<GoldilocksX4>(&mut rng, num_vars);
    let mut exists = vec![true; 1 << num_vars];
    for i in (0..1 << num_vars).filter(|i| i % 3 != 0 || i % 4 == 1) {
        g[i] = GoldilocksX4::zero();
        exists[i] = false;
    }
    let r = (0..num_vars)
        .map(|_| Goldilocks::random(&mut rng))
        .collect::<Vec<_>>();

    let (mut f_dense, mut g_dense) = (f.clone(), g.clone());
    let (mut f_sparse, mut g_sparse) = (f, g);
    let mut dense = MultilinearProductHelper::prepare(num_vars, &mut f_dense, &mut g_dense, None);
    let mut sparse = MultilinearProductHelper::prepare(
        num_vars,
        &mut f_sparse,
        &mut g_sparse,
        Some(exists.as_mut_slice()),
    );
    for (var_idx, r) in r.iter().enumerate() {
        assert_eq!(dense.round_message(var_idx), sparse.round_message(var_idx));
        dense.bind(var_idx, r);
        sparse.bind(var_idx, r);
    }
    assert_eq!(dense.f_claim(), sparse.f_claim());
    assert_eq!(dense.g_claim(), sparse.g_claim());
}

#[test]
fn test_product_sumcheck_end_to_end() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let num_vars = 7;
    let f = random_table::<GoldilocksX4>(&mut rng, num_vars);
    let g = random_table::<GoldilocksX4>(&mut rng, num_vars);
    let claimed_sum: GoldilocksX4 = f.iter().zip(&g).map(|(a, b)| *a * *b).sum();

    let mut prover = ProverTranscript::<Keccak256Hasher>::new(b"product");
    let (mut f_buf, mut g_buf) = (f.clone(), g.clone());
    let (point, f_r, g_r) =
        prove_product_sumcheck(num_vars, &mut f_buf, &mut g_buf, &mut prover).unwrap();
    let proof = prover.finalize();
    assert_eq!(proof.len(), num_vars * 3 * 32);
    assert_eq!(f_r, evaluate_mle(&f, &point));
    assert_eq!(g_r, evaluate_mle(&g, &point));

    let mut verifier = VerifierTranscript::<Keccak256Hasher>::new(b"product", &proof);
    let (verifier_point, reduced) =
        verify_product_sumcheck(num_vars, claimed_sum, &mut verifier).unwrap();
    verifier.finish().unwrap();
    assert_eq!(verifier_point, point);
    assert_eq!(reduced, f_r * g_r);
}

#[test]
fn test_product_sumcheck_rejects_wrong_sum() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let num_vars = 4;
    let mut f = random_table::<Packed<Goldilocks, 1>>(&mut rng, num_vars);
    let mut g = random_table::<Packed<Goldilocks, 1>>(&mut rng, num_vars);
    let claimed_sum: Packed<Goldilocks, 1> = f.iter().zip(&g).map(|(a, b)| *a * *b).sum();

    let mut prover = ProverTranscript::<Sha256Hasher>::new(b"product");
    prove_product_sumcheck(num_vars, &mut f, &mut g, &mut prover).unwrap();
    let proof = prover.finalize();

    let wrong = claimed_sum + Packed::one();
    let mut verifier = VerifierTranscript::<Sha256Hasher>::new(b"product", &proof);
    assert_eq!(
        verify_product_sumcheck(num_vars, wrong, &mut verifier),
        Err(SumcheckError::RoundMismatch { round: 0 })
    );
}
