use async_trait::async_trait;

use vcon_core::{Vcon, VconId};

use crate::error::StoreError;

/// Storage client for vcon records.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Every call is a self-contained request/response: callers receive owned
/// records and hand them back whole on [`store_vcon`](Self::store_vcon).
#[async_trait]
pub trait VconStore: Send + Sync {
    /// Fetch the record with the given identifier.
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists.
    async fn get_vcon(&self, id: &VconId) -> Result<Vcon, StoreError>;

    /// Persist a record under its `uuid`, replacing any previous value.
    async fn store_vcon(&self, vcon: &Vcon) -> Result<(), StoreError>;

    /// Delete a record. Returns `true` if it existed.
    async fn delete_vcon(&self, id: &VconId) -> Result<bool, StoreError>;
}
