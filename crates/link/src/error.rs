use thiserror::Error;

use vcon_store::StoreError;

/// Errors that can occur while a link processes a vcon.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The storage client failed. Passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The options supplied for the link could not be used.
    #[error("invalid link options: {0}")]
    InvalidOptions(String),
}

impl LinkError {
    /// Returns `true` if the error is transient and the caller may retry the
    /// whole link invocation.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_retryable(),
            Self::InvalidOptions(_) => false,
        }
    }
}
