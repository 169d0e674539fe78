use thiserror::Error;
use transcript::TranscriptError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("layer {layer} takes {found} input vars, the layer below outputs {expected}")]
    LayerShapeMismatch {
        layer: usize,
        expected: usize,
        found: usize,
    },
    #[error("gate in layer {layer} references wire {index}, outside 2^{num_vars}")]
    GateIndexOutOfRange {
        layer: usize,
        index: usize,
        num_vars: usize,
    },
    #[error("input has {found} values, the input layer expects {expected}")]
    InputSizeMismatch { expected: usize, found: usize },
    #[error("circuit has no layers")]
    EmptyCircuit,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GkrError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Circuit(#[from] CircuitError),
    #[error("pcs: {0}")]
    Pcs(#[from] mpcs::Error),
    #[error("sumcheck round {round} of layer {layer} is inconsistent with the running claim")]
    SumcheckRoundMismatch { layer: usize, round: usize },
    #[error("residual claim of layer {layer} is not zero")]
    ResidualNonZero { layer: usize },
    #[error("input opening of repetition {repetition} rejected")]
    OpeningRejected { repetition: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GkrError {
    /// Whether the proof was well-formed but failed a check, as opposed to a
    /// parse failure or a misuse of the API.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GkrError::SumcheckRoundMismatch { .. }
                | GkrError::ResidualNonZero { .. }
                | GkrError::OpeningRejected { .. }
                | GkrError::Transcript(TranscriptError::GrindingMismatch)
        )
    }
}
