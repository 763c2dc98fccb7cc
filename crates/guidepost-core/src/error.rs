//! Domain error types.

use thiserror::Error;

use crate::ids::{ProcedureId, StepId};

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested procedure does not exist.
    #[error("procedure not found: {0}")]
    ProcedureNotFound(ProcedureId),

    /// A reachable step could not be resolved from storage.
    #[error("step integrity error at step {step_id}: {reason}")]
    StepIntegrity {
        /// The step that failed to resolve.
        step_id: StepId,
        /// What was missing or inconsistent.
        reason: String,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Builds a `StepIntegrity` error for `step_id`.
    #[must_use]
    pub fn integrity(step_id: StepId, reason: impl Into<String>) -> Self {
        Self::StepIntegrity {
            step_id,
            reason: reason.into(),
        }
    }
}
