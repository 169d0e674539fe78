use p3_baby_bear::BabyBear;
use p3_field::PrimeCharacteristicRing;
use p3_goldilocks::Goldilocks;
use p3_mersenne_31::Mersenne31;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use crate::{
    BabyBearX8, FieldSerde, GoldilocksX4, Mersenne31X16, Packed, SimdField, SmallField,
};

fn serde_roundtrip<F: SmallField>() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..100 {
        let x = F::random(&mut rng);
        let mut buf = vec![];
        x.write_bytes(&mut buf);
        assert_eq!(buf.len(), F::SIZE_BYTES);
        assert_eq!(F::read_bytes(&buf), Some(x));
    }
}

#[test]
fn test_scalar_serde() {
    serde_roundtrip::<Goldilocks>();
    serde_roundtrip::<BabyBear>();
    serde_roundtrip::<Mersenne31>();
}

#[test]
fn test_non_canonical_bytes_rejected() {
    let modulus = Goldilocks::MODULUS_U64.to_le_bytes();
    assert_eq!(Goldilocks::read_bytes(&modulus), None);
    assert_eq!(Goldilocks::read_bytes(&[0u8; 7]), None);

    let modulus = (BabyBear::MODULUS_U64 as u32).to_le_bytes();
    assert_eq!(BabyBear::read_bytes(&modulus), None);
    assert_eq!(
        BabyBear::read_bytes(&(BabyBear::MODULUS_U64 as u32 - 1).to_le_bytes()),
        Some(-BabyBear::ONE)
    );
}

#[test]
fn test_packed_lanes_are_independent() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let a = GoldilocksX4::random(&mut rng);
    let b = GoldilocksX4::random(&mut rng);
    let s = Goldilocks::random(&mut rng);

    let (la, lb) = (a.unpack(), b.unpack());
    let prod = (a * b + a).scale(&s) - b;
    for (i, lane) in prod.unpack().into_iter().enumerate() {
        assert_eq!(lane, (la[i] * lb[i] + la[i]) * s - lb[i]);
    }
    assert_eq!(a - a, GoldilocksX4::zero());
    assert!((a + (-a)).is_zero());
    assert_eq!(GoldilocksX4::from_scalar(s).unpack(), vec![s; 4]);
}

#[test]
fn test_packed_serde() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let x = Mersenne31X16::random(&mut rng);
    let mut buf = vec![];
    x.write_bytes(&mut buf);
    assert_eq!(buf.len(), 64);
    assert_eq!(Mersenne31X16::read_bytes(&buf), Some(x));

    let y = BabyBearX8::random(&mut rng);
    let mut buf = vec![];
    y.write_bytes(&mut buf);
    // corrupt the top bit of the last lane so it exceeds the modulus
    *buf.last_mut().unwrap() |= 0x80;
    assert_eq!(BabyBearX8::read_bytes(&buf), None);
}

#[test]
fn test_sum_and_modulus_bits() {
    let xs = (1..=4u64)
        .map(|i| Packed::<Goldilocks, 1>::from_scalar(Goldilocks::from_u64(i)))
        .collect::<Vec<_>>();
    let total: Packed<Goldilocks, 1> = xs.into_iter().sum();
    assert_eq!(total.0[0], Goldilocks::from_u64(10));
    assert_eq!(Goldilocks::modulus_bits(), 64);
    assert_eq!(BabyBear::modulus_bits(), 31);
    assert_eq!(Mersenne31::modulus_bits(), 31);
}
