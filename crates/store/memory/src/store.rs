use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use vcon_core::{Vcon, VconId};
use vcon_store::error::StoreError;
use vcon_store::store::VconStore;

/// In-memory [`VconStore`] backed by a [`DashMap`].
///
/// Records are kept as serialized JSON, so every `get_vcon` hands out a fresh
/// copy and callers can never mutate what is stored without calling
/// `store_vcon`, the same as with a remote backend. This implementation is
/// fully synchronous internally; the async trait methods return immediately.
#[derive(Debug, Default)]
pub struct MemoryVconStore {
    data: DashMap<String, String>,
}

impl MemoryVconStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl VconStore for MemoryVconStore {
    async fn get_vcon(&self, id: &VconId) -> Result<Vcon, StoreError> {
        // Clone the JSON out so the shard guard is released before decoding.
        let json = self
            .data
            .get(id.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(Vcon::from_json(&json)?)
    }

    async fn store_vcon(&self, vcon: &Vcon) -> Result<(), StoreError> {
        let json = vcon.to_json()?;
        debug!(vcon_id = %vcon.uuid, bytes = json.len(), "storing vcon in memory");
        self.data.insert(vcon.uuid.to_string(), json);
        Ok(())
    }

    async fn delete_vcon(&self, id: &VconId) -> Result<bool, StoreError> {
        Ok(self.data.remove(id.as_str()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vcon_core::Encoding;
    use vcon_store::testing::run_store_conformance_tests;

    use super::*;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryVconStore::new();
        run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }

    #[tokio::test]
    async fn len_tracks_records() {
        let store = MemoryVconStore::new();
        assert!(store.is_empty());

        let mut vcon = Vcon::new();
        vcon.add_attachment("t", json!(1), Encoding::None);
        store.store_vcon(&vcon).await.unwrap();
        store.store_vcon(&vcon).await.unwrap();
        assert_eq!(store.len(), 1);

        store.delete_vcon(&vcon.uuid).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn corrupt_entry_reports_serialization_error() {
        let store = MemoryVconStore::new();
        store.data.insert("broken".into(), "{not json".into());
        let id = VconId::parse("broken").unwrap();
        let err = store.get_vcon(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
