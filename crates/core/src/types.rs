use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VconError;

/// Identifier of a vcon record (its `uuid` field).
///
/// Opaque to links: it is never renamed or reassigned, only passed through.
/// The only rule enforced is that it is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VconId(String);

impl VconId {
    /// Parse an identifier, rejecting empty or whitespace-only values.
    pub fn parse(value: impl Into<String>) -> Result<Self, VconError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(VconError::InvalidId("identifier must not be empty".into()));
        }
        Ok(Self(value))
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Return the inner string as a str slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VconId {
    type Err = VconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VconId {
    type Error = VconError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for VconId {
    type Error = VconError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<VconId> for String {
    fn from(id: VconId) -> Self {
        id.0
    }
}

impl std::ops::Deref for VconId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VconId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
