use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

pub const DIGEST_SIZE: usize = 32;

/// Fixed-output hash backing the transcript and the grinding step.
pub trait FiatShamirHasher: Clone + Default + Send + Sync + 'static {
    /// Identifier string
    const NAME: &'static str;

    fn hash(input: &[u8]) -> [u8; DIGEST_SIZE];
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Hasher;

impl FiatShamirHasher for Keccak256Hasher {
    const NAME: &'static str = "Keccak256";

    fn hash(input: &[u8]) -> [u8; DIGEST_SIZE] {
        let mut keccak = Keccak::v256();
        keccak.update(input);
        let mut output = [0u8; DIGEST_SIZE];
        keccak.finalize(&mut output);
        output
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl FiatShamirHasher for Sha256Hasher {
    const NAME: &'static str = "SHA256";

    fn hash(input: &[u8]) -> [u8; DIGEST_SIZE] {
        let digest = Sha256::digest(input);
        let mut output = [0u8; DIGEST_SIZE];
        output.copy_from_slice(&digest);
        output
    }
}
