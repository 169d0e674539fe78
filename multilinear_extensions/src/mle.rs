use ff_ext::SimdField;

/// Bind the lowest variable of the table held in `evals[..2^num_vars]` to `r`:
/// `evals[i] = evals[2i] + r * (evals[2i + 1] - evals[2i])`.
#[inline]
pub fn fix_low_variable_in_place<F: SimdField>(evals: &mut [F], num_vars: usize, r: &F::Scalar) {
    assert!(num_vars > 0, "no variable left to fix");
    for i in 0..1 << (num_vars - 1) {
        let (lo, hi) = (evals[2 * i], evals[2 * i + 1]);
        evals[i] = lo + (hi - lo).scale(r);
    }
}

/// Bind the `partial_point.len()` lowest variables, one at a time.
pub fn fix_variables_in_place<F: SimdField>(
    evals: &mut [F],
    num_vars: usize,
    partial_point: &[F::Scalar],
) {
    assert!(
        partial_point.len() <= num_vars,
        "invalid size of partial point"
    );
    for (i, r) in partial_point.iter().enumerate() {
        fix_low_variable_in_place(evals, num_vars - i, r);
    }
}

/// Evaluate the multilinear extension of `evals` at `point`.
pub fn evaluate_mle<F: SimdField>(evals: &[F], point: &[F::Scalar]) -> F {
    assert_eq!(
        evals.len(),
        1 << point.len(),
        "MLE size does not match the point"
    );
    let mut buf = evals.to_vec();
    fix_variables_in_place(&mut buf, point.len(), point);
    buf[0]
}
