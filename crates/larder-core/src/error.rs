use thiserror::Error;

/// Failures of a planning request.
///
/// Unresolved recipe references and empty token sets are recovered where they
/// occur and never surface here.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("malformed plan proposal: {reason}")]
    MalformedProposal { reason: String },

    #[error("not enough recipes match your preferences: {available} available, {required} required")]
    InsufficientPool { available: usize, required: usize },

    #[error(transparent)]
    Proposer(#[from] anyhow::Error),
}

impl PlanningError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedProposal {
            reason: reason.into(),
        }
    }
}
