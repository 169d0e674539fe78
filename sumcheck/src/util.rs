use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use ff_ext::SimdField;

#[derive(Clone, Copy, Debug)]
/// Fixed-size accumulator, summed element-wise across rayon workers.
pub struct AdditiveArray<F, const N: usize>(pub [F; N]);

impl<F: SimdField, const N: usize> Default for AdditiveArray<F, N> {
    fn default() -> Self {
        AdditiveArray([F::zero(); N])
    }
}

impl<F: SimdField, const N: usize> AddAssign for AdditiveArray<F, N> {
    fn add_assign(&mut self, rhs: Self) {
        self.0
            .iter_mut()
            .zip(rhs.0)
            .for_each(|(acc, item)| *acc += item);
    }
}

impl<F: SimdField, const N: usize> Add for AdditiveArray<F, N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<F: SimdField, const N: usize> Sum for AdditiveArray<F, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, item| acc + item)
    }
}
