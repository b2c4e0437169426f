use thiserror::Error;
use toonstudio_core::error::GatewayError;

/// Why a job ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Caught locally before any remote call.
    #[error("{0}")]
    Validation(String),

    /// Reported by (or on the way to) the remote service.
    #[error("{0}")]
    Remote(String),
}

impl WorkflowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Validation(_))
    }
}

impl From<GatewayError> for WorkflowError {
    fn from(e: GatewayError) -> Self {
        WorkflowError::Remote(e.to_string())
    }
}

/// Failure of the copy-to-clipboard side action. Never changes job state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("nothing to copy yet")]
    NothingToCopy,

    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),
}
