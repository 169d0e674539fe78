use std::{
    array,
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand_core::RngCore;

use crate::{FieldSerde, SimdField, SmallField};

/// `N` independent lanes of a [`SmallField`], operated on element-wise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packed<F, const N: usize>(pub [F; N]);

impl<F: SmallField, const N: usize> Packed<F, N> {
    #[inline(always)]
    fn map2(self, rhs: Self, f: impl Fn(F, F) -> F) -> Self {
        Packed(array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }
}

impl<F: SmallField, const N: usize> Add for Packed<F, N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a + b)
    }
}

impl<F: SmallField, const N: usize> Sub for Packed<F, N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a - b)
    }
}

impl<F: SmallField, const N: usize> Mul for Packed<F, N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a * b)
    }
}

impl<F: SmallField, const N: usize> Neg for Packed<F, N> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Packed(self.0.map(|a| -a))
    }
}

impl<F: SmallField, const N: usize> AddAssign for Packed<F, N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<F: SmallField, const N: usize> SubAssign for Packed<F, N> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<F: SmallField, const N: usize> MulAssign for Packed<F, N> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<F: SmallField, const N: usize> Sum for Packed<F, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<F: SmallField, const N: usize> FieldSerde for Packed<F, N> {
    const SIZE_BYTES: usize = N * F::SIZE_BYTES;

    fn write_bytes(&self, buf: &mut Vec<u8>) {
        self.0.iter().for_each(|lane| lane.write_bytes(buf));
    }

    fn read_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::SIZE_BYTES {
            return None;
        }
        let lanes = bytes
            .chunks_exact(F::SIZE_BYTES)
            .map(F::read_bytes)
            .collect::<Option<Vec<_>>>()?;
        Some(Self::pack(&lanes))
    }
}

impl<F: SmallField, const N: usize> SimdField for Packed<F, N> {
    type Scalar = F;

    const PACK_SIZE: usize = N;

    fn zero() -> Self {
        Packed([F::ZERO; N])
    }

    fn one() -> Self {
        Packed([F::ONE; N])
    }

    fn from_scalar(scalar: F) -> Self {
        Packed([scalar; N])
    }

    #[inline(always)]
    fn scale(&self, scalar: &F) -> Self {
        Packed(self.0.map(|a| a * *scalar))
    }

    fn pack(lanes: &[F]) -> Self {
        assert_eq!(lanes.len(), N, "expected {N} lanes, got {}", lanes.len());
        Packed(array::from_fn(|i| lanes[i]))
    }

    fn unpack(&self) -> Vec<F> {
        self.0.to_vec()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Packed(array::from_fn(|_| F::random(rng)))
    }
}
