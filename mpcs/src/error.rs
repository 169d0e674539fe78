use thiserror::Error;
use transcript::TranscriptError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid pcs param: {0}")]
    InvalidPcsParam(String),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("malformed commitment")]
    MalformedCommitment,
    #[error("opening does not match the claimed evaluation")]
    EvaluationMismatch,
}
