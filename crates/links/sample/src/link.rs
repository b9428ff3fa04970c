use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use vcon_core::{Encoding, VconId};
use vcon_link::{Link, LinkError};
use vcon_store::VconStore;

use crate::options::SampleLinkOptions;

/// Link that appends a custom attachment to a vcon.
///
/// Each invocation performs exactly one read and one write against the
/// injected store and keeps no state between calls. Running it twice on the
/// same vcon appends two attachments.
pub struct SampleLink {
    name: String,
    store: Arc<dyn VconStore>,
}

impl SampleLink {
    /// Name the link registers under unless overridden.
    pub const DEFAULT_NAME: &'static str = "sample_link";

    /// Create a link that reads and writes vcons through `store`.
    pub fn new(store: Arc<dyn VconStore>) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            store,
        }
    }

    /// Override the registered name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append the configured attachment to the vcon and store it back.
    ///
    /// `None` options use [`SampleLinkOptions::default`]. Returns `vcon_id`
    /// unchanged. Store failures are propagated without retry.
    pub async fn process(
        &self,
        vcon_id: &VconId,
        link_name: &str,
        options: Option<SampleLinkOptions>,
    ) -> Result<VconId, LinkError> {
        debug!(link_name, vcon_id = %vcon_id, "starting link");

        let options = options.unwrap_or_default();

        let mut vcon = self.store.get_vcon(vcon_id).await?;
        vcon.add_attachment(options.attachment_type, options.custom_data, Encoding::None);
        self.store.store_vcon(&vcon).await?;

        Ok(vcon_id.clone())
    }
}

impl Link for SampleLink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(
        &self,
        vcon_id: &VconId,
        link_name: &str,
        options: Option<&Value>,
    ) -> Result<VconId, LinkError> {
        let options = options.map(SampleLinkOptions::from_value).transpose()?;
        self.process(vcon_id, link_name, options).await
    }
}
