mod error;
pub mod macros;
mod prover;
pub mod util;
mod verifier;

pub use error::SumcheckError;
pub use prover::{MultilinearProductHelper, PARALLEL_PAIRS_THRESHOLD, prove_product_sumcheck};
pub use verifier::{degree_2_eval, verify_product_sumcheck, verify_sumcheck_round};

#[doc(hidden)]
pub use tracing;

#[cfg(test)]
mod test;
