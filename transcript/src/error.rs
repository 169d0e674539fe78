use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("transcript buffer overflow: {pending} pending + {incoming} incoming bytes exceeds {capacity}")]
    BufferOverflow {
        pending: usize,
        incoming: usize,
        capacity: usize,
    },
    #[error("proof truncated: needed {needed} bytes, {remaining} remaining")]
    ProofTruncated { needed: usize, remaining: usize },
    #[error("malformed field element at proof offset {offset}")]
    MalformedElement { offset: usize },
    #[error("{remaining} trailing bytes after the end of the proof")]
    TrailingBytes { remaining: usize },
    #[error("grinding result does not match the transcript state")]
    GrindingMismatch,
}
