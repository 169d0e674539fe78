use std::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

pub use p3_baby_bear::BabyBear;
pub use p3_field::{Field, PrimeCharacteristicRing, PrimeField64};
pub use p3_goldilocks::Goldilocks;
pub use p3_mersenne_31::Mersenne31;
use rand_core::RngCore;
use serde::Serialize;

mod babybear;
mod goldilock;
mod mersenne31;
mod packed;

pub use babybear::impl_babybear::*;
pub use goldilock::impl_goldilocks::*;
pub use mersenne31::impl_mersenne31::*;
pub use packed::Packed;

/// Fixed-width little-endian encoding used by the transcript and the proof.
pub trait FieldSerde: Sized {
    /// Number of bytes produced by [`FieldSerde::write_bytes`].
    const SIZE_BYTES: usize;

    fn write_bytes(&self, buf: &mut Vec<u8>);

    /// Returns `None` on a length mismatch or a non-canonical encoding.
    fn read_bytes(bytes: &[u8]) -> Option<Self>;
}

/// The primitive scalar field. Challenges and gate coefficients live here.
pub trait SmallField: PrimeField64 + FieldSerde + Serialize {
    /// Identifier string
    const NAME: &'static str;

    /// MODULUS as u64
    const MODULUS_U64: u64;

    /// Convert a field elements to a u64.
    fn to_canonical_u64(&self) -> u64 {
        self.as_canonical_u64()
    }

    fn try_from_canonical_u64(value: u64) -> Option<Self> {
        (value < Self::MODULUS_U64).then(|| Self::from_u64(value))
    }

    /// Reduce 16 uniform bytes modulo the field order.
    fn from_uniform_bytes(bytes: &[u8; 16]) -> Self {
        let value = u128::from_le_bytes(*bytes) % Self::MODULUS_U64 as u128;
        Self::from_u64(value as u64)
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Self::from_uniform_bytes(&bytes)
    }

    /// Number of bits of the modulus.
    fn modulus_bits() -> u32 {
        u64::BITS - Self::MODULUS_U64.leading_zeros()
    }
}

/// The batched field carrying wire values. Every lane is an independent
/// circuit instance; all lanes share the same scalar challenges.
pub trait SimdField:
    FieldSerde
    + Copy
    + Debug
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Sum
{
    type Scalar: SmallField;

    /// Number of scalar lanes.
    const PACK_SIZE: usize;

    fn zero() -> Self;

    fn one() -> Self;

    /// Broadcast a scalar into every lane.
    fn from_scalar(scalar: Self::Scalar) -> Self;

    /// Multiply every lane by the same scalar.
    fn scale(&self, scalar: &Self::Scalar) -> Self;

    fn pack(lanes: &[Self::Scalar]) -> Self;

    fn unpack(&self) -> Vec<Self::Scalar>;

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

macro_rules! impl_field_serde {
    ($field:ty, $size:expr) => {
        impl $crate::FieldSerde for $field {
            const SIZE_BYTES: usize = $size;

            fn write_bytes(&self, buf: &mut Vec<u8>) {
                let value = $crate::SmallField::to_canonical_u64(self);
                buf.extend_from_slice(&value.to_le_bytes()[..$size]);
            }

            fn read_bytes(bytes: &[u8]) -> Option<Self> {
                if bytes.len() != $size {
                    return None;
                }
                let mut array = [0u8; 8];
                array[..$size].copy_from_slice(bytes);
                <Self as $crate::SmallField>::try_from_canonical_u64(u64::from_le_bytes(array))
            }
        }
    };
}
pub(crate) use impl_field_serde;

#[cfg(test)]
mod test;
