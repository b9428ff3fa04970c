use async_trait::async_trait;
use serde_json::Value;

use vcon_core::VconId;

use crate::error::LinkError;

/// A pipeline step that processes one vcon per invocation.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods. If you need dynamic dispatch, use [`DynLink`] instead -- every
/// `Link` automatically implements `DynLink` via a blanket implementation.
pub trait Link: Send + Sync {
    /// Returns the name this link is registered under.
    fn name(&self) -> &str;

    /// Process the vcon identified by `vcon_id` and return the identifier of
    /// the vcon to hand to the next step.
    ///
    /// `link_name` is the label the orchestrator invoked this link with and
    /// is used only for diagnostics. `options` is the raw per-invocation
    /// configuration mapping; `None` means the link's defaults apply.
    fn run(
        &self,
        vcon_id: &VconId,
        link_name: &str,
        options: Option<&Value>,
    ) -> impl std::future::Future<Output = Result<VconId, LinkError>> + Send;
}

/// Object-safe link trait for use behind `Arc<dyn DynLink>`.
///
/// You generally should not implement this trait directly -- instead
/// implement [`Link`] and rely on the blanket implementation.
#[async_trait]
pub trait DynLink: Send + Sync {
    /// Returns the name this link is registered under.
    fn name(&self) -> &str;

    /// Process a vcon. See [`Link::run`].
    async fn run(
        &self,
        vcon_id: &VconId,
        link_name: &str,
        options: Option<&Value>,
    ) -> Result<VconId, LinkError>;
}

#[async_trait]
impl<T: Link + Sync> DynLink for T {
    fn name(&self) -> &str {
        Link::name(self)
    }

    async fn run(
        &self,
        vcon_id: &VconId,
        link_name: &str,
        options: Option<&Value>,
    ) -> Result<VconId, LinkError> {
        Link::run(self, vcon_id, link_name, options).await
    }
}
