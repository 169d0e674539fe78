use ff_ext::SmallField;
use rayon::prelude::*;

/// Tables with at least this many entries are filled with rayon.
pub const PARALLEL_THRESHOLD: usize = 1 << 14;

/// `x * y + (1 - x) * (1 - y)`
#[inline(always)]
pub fn eq<F: SmallField>(x: F, y: F) -> F {
    let xy = x * y;
    xy + xy - x - y + F::ONE
}

/// Evaluate eq polynomial.
pub fn eq_eval<F: SmallField>(x: &[F], y: &[F]) -> F {
    assert_eq!(x.len(), y.len(), "x and y have different length");
    x.iter()
        .zip(y)
        .fold(F::ONE, |acc, (&xi, &yi)| acc * eq(xi, yi))
}

/// Multilinear extension of "all three points agree":
/// `prod_i (x_i y_i z_i + (1 - x_i)(1 - y_i)(1 - z_i))`.
pub fn eq3_eval<F: SmallField>(x: &[F], y: &[F], z: &[F]) -> F {
    assert!(
        x.len() == y.len() && y.len() == z.len(),
        "x, y and z have different length"
    );
    x.iter()
        .zip(y)
        .zip(z)
        .fold(F::ONE, |acc, ((&xi, &yi), &zi)| {
            acc * (xi * yi * zi + (F::ONE - xi) * (F::ONE - yi) * (F::ONE - zi))
        })
}

/// `eq(r, b)` where bit `i` of `index` is the boolean coordinate `b_i`.
pub fn eq_eval_at_index<F: SmallField>(r: &[F], index: usize) -> F {
    r.iter().enumerate().fold(F::ONE, |acc, (i, &ri)| {
        if (index >> i) & 1 == 1 {
            acc * ri
        } else {
            acc * (F::ONE - ri)
        }
    })
}

/// Fill `out[..2^|r|]` with `scale * eq(r, b)` for every boolean `b`.
///
/// `r[0]` is the lowest bit of the table index. Each step doubles the filled
/// range: entry `j` splits into `j` (bit clear) and `j + cur` (bit set), so the
/// whole table costs one multiplication per entry.
pub fn eq_evals_at<F: SmallField>(r: &[F], scale: F, out: &mut [F]) {
    let size = 1 << r.len();
    assert!(
        out.len() >= size,
        "eq buffer holds {} entries, {size} needed",
        out.len()
    );
    out[0] = scale;
    let mut cur = 1;
    for &ri in r {
        for j in 0..cur {
            let hi = out[j] * ri;
            out[j + cur] = hi;
            out[j] -= hi;
        }
        cur <<= 1;
    }
}

/// Same table as [`eq_evals_at`], computed as the tensor product of the two
/// halves of `r`.
///
/// `first_half` and `second_half` need `2^ceil(|r| / 2)` entries each; `out`
/// is written in row-major chunks, in parallel once the table is large.
pub fn eq_evals_at_with_buf<F: SmallField>(
    r: &[F],
    scale: F,
    out: &mut [F],
    first_half: &mut [F],
    second_half: &mut [F],
) {
    let size = 1 << r.len();
    assert!(
        out.len() >= size,
        "eq buffer holds {} entries, {size} needed",
        out.len()
    );
    let (r_lo, r_hi) = r.split_at(r.len() / 2);
    eq_evals_at(r_lo, F::ONE, first_half);
    eq_evals_at(r_hi, scale, second_half);

    let first = &first_half[..1 << r_lo.len()];
    let second = &second_half[..1 << r_hi.len()];
    let fill = |(hi, chunk): (usize, &mut [F])| {
        chunk
            .iter_mut()
            .zip(first)
            .for_each(|(o, &lo)| *o = second[hi] * lo);
    };
    if size >= PARALLEL_THRESHOLD {
        out[..size]
            .par_chunks_mut(first.len())
            .enumerate()
            .for_each(fill);
    } else {
        out[..size].chunks_mut(first.len()).enumerate().for_each(fill);
    }
}

/// Allocating form of [`eq_evals_at_with_buf`] with `scale = 1`.
#[tracing::instrument(skip_all, name = "multilinear_extensions::build_eq_x_r_vec", level = "trace")]
pub fn build_eq_x_r_vec<F: SmallField>(r: &[F]) -> Vec<F> {
    let half = 1 << r.len().div_ceil(2);
    let mut out = vec![F::ZERO; 1 << r.len()];
    let mut first_half = vec![F::ZERO; half];
    let mut second_half = vec![F::ZERO; half];
    eq_evals_at_with_buf(r, F::ONE, &mut out, &mut first_half, &mut second_half);
    out
}
