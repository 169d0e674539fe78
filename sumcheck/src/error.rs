use thiserror::Error;
use transcript::TranscriptError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SumcheckError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("p(0) + p(1) does not match the running claim at round {round}")]
    RoundMismatch { round: usize },
}
