use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::attachment::{Attachment, Encoding, present};
use crate::error::VconError;
use crate::types::VconId;

/// Version string written into newly created records.
pub const VCON_VERSION: &str = "0.0.1";

/// A virtual conversation record.
///
/// Only `uuid` and `attachments` are interpreted here. `vcon` and
/// `created_at` are carried exactly as read, and every other top-level field
/// (parties, dialog, analysis, meta, ...) lives in `extra`, so a
/// read-modify-write cycle never drops, reformats or invents data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vcon {
    pub uuid: VconId,

    /// Format version, if the record declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcon: Option<String>,

    /// Creation timestamp as written by whoever created the record.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Value>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Vcon {
    /// Create an empty record with a freshly generated identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(VconId::generate())
    }

    /// Create an empty record with the given identifier.
    ///
    /// The record carries the current version, a creation timestamp and
    /// empty `parties`, `dialog`, `analysis` and `meta` sections.
    #[must_use]
    pub fn with_id(uuid: VconId) -> Self {
        let mut extra = Map::new();
        extra.insert("meta".into(), json!({}));
        extra.insert("parties".into(), json!([]));
        extra.insert("dialog".into(), json!([]));
        extra.insert("analysis".into(), json!([]));

        Self {
            uuid,
            vcon: Some(VCON_VERSION.to_owned()),
            created_at: Some(Value::String(
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            )),
            attachments: Vec::new(),
            extra,
        }
    }

    /// Append an attachment and return a reference to it.
    pub fn add_attachment(
        &mut self,
        attachment_type: impl Into<String>,
        body: Value,
        encoding: Encoding,
    ) -> &Attachment {
        self.attachments
            .push(Attachment::new(attachment_type, body, encoding));
        // Just pushed, so the vec is non-empty.
        &self.attachments[self.attachments.len() - 1]
    }

    /// Return the first attachment whose type matches, if any.
    #[must_use]
    pub fn find_attachment_by_type(&self, attachment_type: &str) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|a| a.attachment_type() == Some(attachment_type))
    }

    /// Decode a record from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, VconError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the record as compact JSON.
    pub fn to_json(&self) -> Result<String, VconError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Vcon {
    fn default() -> Self {
        Self::new()
    }
}
