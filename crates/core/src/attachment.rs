use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// How an attachment `body` is encoded.
///
/// Encodings other than the three this crate produces are kept verbatim in
/// [`Encoding::Other`] so records written by other tools still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Encoding {
    /// The body is a plain JSON value stored as-is.
    #[default]
    None,
    /// The body is a string containing serialized JSON.
    Json,
    /// The body is a base64url-encoded string.
    Base64Url,
    /// Any other encoding label.
    Other(String),
}

impl Encoding {
    /// Return the wire name of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Base64Url => "base64url",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Encoding {
    fn from(s: &str) -> Self {
        match s {
            "none" => Self::None,
            "json" => Self::Json,
            "base64url" => Self::Base64Url,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Encoding {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

/// Deserialize a present field as `Some`, including an explicit `null`.
///
/// Paired with `#[serde(default)]` so a missing key stays `None` and is not
/// written back, while `"body": null` survives a round trip.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A typed, encoded payload attached to a vcon.
///
/// Attachments keep their insertion order on the record and `type` is not
/// unique: a record may carry several attachments with the same label.
/// Every field is optional on the read path, since attachments written by
/// other tools may reference their content by `url` or be keyed by `purpose`
/// instead. Fields not named here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Free-form label identifying what the attachment holds.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<String>,
    /// Attachment payload.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<Value>,
    /// Encoding of `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    /// Fields this type does not interpret (`mediatype`, `party`, `url`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attachment {
    /// Create a new attachment.
    pub fn new(attachment_type: impl Into<String>, body: Value, encoding: Encoding) -> Self {
        Self {
            attachment_type: Some(attachment_type.into()),
            body: Some(body),
            encoding: Some(encoding),
            extra: Map::new(),
        }
    }

    /// Return the type label, if the attachment has one.
    pub fn attachment_type(&self) -> Option<&str> {
        self.attachment_type.as_deref()
    }
}
