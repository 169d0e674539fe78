pub mod impl_goldilocks {
    use p3_goldilocks::Goldilocks;

    use crate::{Packed, SmallField, impl_field_serde};

    /// Four Goldilocks lanes, one 256-bit vector.
    pub type GoldilocksX4 = Packed<Goldilocks, 4>;

    impl_field_serde!(Goldilocks, 8);

    impl SmallField for Goldilocks {
        /// Identifier string
        const NAME: &'static str = "Goldilocks";
        const MODULUS_U64: u64 = 0xffff_ffff_0000_0001;
    }
}
