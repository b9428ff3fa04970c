use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use vcon_link::LinkError;

/// Attachment type used when no options are supplied.
pub const DEFAULT_ATTACHMENT_TYPE: &str = "sample_data";

/// Attachment body used when `custom_data` is not supplied.
pub fn default_custom_data() -> Value {
    json!({"foo": "bar"})
}

/// Options accepted by [`SampleLink`](crate::SampleLink).
///
/// When an options mapping is supplied, `attachment_type` is required and
/// `custom_data` falls back to `{"foo": "bar"}`. Keys other than these two
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleLinkOptions {
    /// Body of the appended attachment.
    #[serde(default = "default_custom_data")]
    pub custom_data: Value,

    /// Type label of the appended attachment.
    pub attachment_type: String,
}

impl SampleLinkOptions {
    /// Parse options from the raw mapping an orchestrator passes to a link.
    pub fn from_value(value: &Value) -> Result<Self, LinkError> {
        Self::deserialize(value).map_err(|e| LinkError::InvalidOptions(e.to_string()))
    }
}

impl Default for SampleLinkOptions {
    fn default() -> Self {
        Self {
            custom_data: default_custom_data(),
            attachment_type: DEFAULT_ATTACHMENT_TYPE.to_owned(),
        }
    }
}
