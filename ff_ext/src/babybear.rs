pub mod impl_babybear {
    use p3_baby_bear::BabyBear;

    use crate::{Packed, SmallField, impl_field_serde};

    pub type BabyBearX8 = Packed<BabyBear, 8>;

    impl_field_serde!(BabyBear, 4);

    impl SmallField for BabyBear {
        const NAME: &'static str = "BabyBear";
        const MODULUS_U64: u64 = 0x7800_0001;
    }
}
