use thiserror::Error;

/// Errors raised while building or decoding vcon records.
#[derive(Debug, Error)]
pub enum VconError {
    #[error("invalid vcon id: {0}")]
    InvalidId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for VconError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
