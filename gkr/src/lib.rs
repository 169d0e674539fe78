//! GKR over layered arithmetic circuits: circuit model, layer-by-layer
//! sumcheck reduction, and the commit / prove / verify scheme around it.

mod circuit;
mod communicator;
mod config;
mod error;
mod prover;
mod scheme;
mod scratch_pad;
mod verifier;

pub use circuit::{
    Circuit, Coefficient, Gate, Gate1In, Gate2In, GateCIn, Layer, SparseConnection,
};
pub use communicator::{Communicator, SingleProcess, ThreadCommunicator};
pub use config::{
    BabyBearX8Sha256, GkrConfig, GkrEngine, GoldilocksX4Keccak, Mersenne31X16Keccak,
};
pub use error::{CircuitError, GkrError};
pub use prover::{InputClaims, gkr_prove};
pub use scheme::{GkrProver, GkrVerifier, TRANSCRIPT_LABEL};
pub use scratch_pad::ScratchPad;
pub use verifier::gkr_verify;
