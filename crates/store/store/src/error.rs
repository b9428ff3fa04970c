use thiserror::Error;

use vcon_core::VconError;

/// Errors from vcon storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("vcon not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid store configuration: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Returns `true` if the error is transient and the operation may succeed
    /// on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<VconError> for StoreError {
    fn from(e: VconError) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(StoreError::Connection("reset".into()).is_retryable());
        assert!(!StoreError::NotFound("x".into()).is_retryable());
        assert!(!StoreError::Serialization("x".into()).is_retryable());
        assert!(!StoreError::Backend("x".into()).is_retryable());
        assert!(!StoreError::Configuration("x".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = StoreError::NotFound("test-uuid".into());
        assert_eq!(err.to_string(), "vcon not found: test-uuid");
    }

    #[test]
    fn vcon_error_maps_to_serialization() {
        let err: StoreError = VconError::Serialization("bad json".into()).into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
