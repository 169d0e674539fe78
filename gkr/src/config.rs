use ff_ext::{BabyBearX8, GoldilocksX4, Mersenne31X16, SimdField, SmallField};
use mpcs::{PolynomialCommitmentScheme, RawPcs};
use serde::{Deserialize, Serialize};
use transcript::{FiatShamirHasher, Keccak256Hasher, Sha256Hasher};

use crate::GkrError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GkrConfig {
    /// Target soundness in bits.
    pub security_bits: usize,
    /// Proof-of-work bits; each one saves one bit of sumcheck soundness.
    pub grinding_bits: usize,
    /// Number of workers holding an input shard. Must be a power of two.
    pub world_size: usize,
}

impl Default for GkrConfig {
    fn default() -> Self {
        Self {
            security_bits: 100,
            grinding_bits: 10,
            world_size: 1,
        }
    }
}

impl GkrConfig {
    pub fn validate(&self) -> Result<(), GkrError> {
        if !self.world_size.is_power_of_two() {
            return Err(GkrError::Config(format!(
                "world size {} is not a power of two",
                self.world_size
            )));
        }
        if self.grinding_bits >= 64 {
            return Err(GkrError::Config(format!(
                "{} grinding bits is not a feasible amount of work",
                self.grinding_bits
            )));
        }
        Ok(())
    }

    pub fn lg_world_size(&self) -> usize {
        self.world_size.trailing_zeros() as usize
    }

    /// Independent GKR runs needed so that `repetitions * (bits(Fp) - 1)`
    /// covers the security left after grinding.
    pub fn num_repetitions<Fp: SmallField>(&self) -> usize {
        let per_run = Fp::modulus_bits() as usize - 1;
        self.security_bits
            .saturating_sub(self.grinding_bits)
            .div_ceil(per_run)
            .max(1)
    }
}

/// Type-level bundle of the field, hash and commitment a proof runs with.
pub trait GkrEngine: Send + Sync + 'static {
    type Field: SimdField;
    type Hasher: FiatShamirHasher;
    type Pcs: PolynomialCommitmentScheme<Self::Field>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GoldilocksX4Keccak;

impl GkrEngine for GoldilocksX4Keccak {
    type Field = GoldilocksX4;
    type Hasher = Keccak256Hasher;
    type Pcs = RawPcs<GoldilocksX4>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BabyBearX8Sha256;

impl GkrEngine for BabyBearX8Sha256 {
    type Field = BabyBearX8;
    type Hasher = Sha256Hasher;
    type Pcs = RawPcs<BabyBearX8>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Mersenne31X16Keccak;

impl GkrEngine for Mersenne31X16Keccak {
    type Field = Mersenne31X16;
    type Hasher = Keccak256Hasher;
    type Pcs = RawPcs<Mersenne31X16>;
}
