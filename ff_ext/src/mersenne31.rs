pub mod impl_mersenne31 {
    use p3_mersenne_31::Mersenne31;

    use crate::{Packed, SmallField, impl_field_serde};

    /// Sixteen M31 lanes, one 512-bit vector.
    pub type Mersenne31X16 = Packed<Mersenne31, 16>;

    impl_field_serde!(Mersenne31, 4);

    impl SmallField for Mersenne31 {
        const NAME: &'static str = "Mersenne31";
        const MODULUS_U64: u64 = (1 << 31) - 1;
    }
}
