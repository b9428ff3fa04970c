use serde_json::json;

use vcon_core::{Encoding, Vcon, VconId};

use crate::error::StoreError;
use crate::store::VconStore;

fn test_id(id: &str) -> VconId {
    VconId::parse(format!("conformance-{id}")).expect("conformance ids are non-empty")
}

/// Run the full vcon store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if a store operation fails unexpectedly.
pub async fn run_store_conformance_tests(store: &dyn VconStore) -> Result<(), StoreError> {
    test_get_missing(store).await?;
    test_store_and_get(store).await?;
    test_store_replaces(store).await?;
    test_fetched_copy_is_detached(store).await?;
    test_delete(store).await?;
    Ok(())
}

async fn test_get_missing(store: &dyn VconStore) -> Result<(), StoreError> {
    let id = test_id("missing");
    let result = store.get_vcon(&id).await;
    assert!(
        matches!(result, Err(StoreError::NotFound(_))),
        "get on missing id should return NotFound"
    );
    Ok(())
}

async fn test_store_and_get(store: &dyn VconStore) -> Result<(), StoreError> {
    let mut vcon = Vcon::with_id(test_id("store-get"));
    vcon.extra
        .insert("parties".into(), json!([{"tel": "+15551234567"}]));
    vcon.add_attachment("first", json!({"n": 1}), Encoding::None);
    vcon.add_attachment("second", json!("e30"), Encoding::Base64Url);
    store.store_vcon(&vcon).await?;

    let fetched = store.get_vcon(&vcon.uuid).await?;
    assert_eq!(fetched, vcon, "fetched record should equal stored record");
    Ok(())
}

async fn test_store_replaces(store: &dyn VconStore) -> Result<(), StoreError> {
    let id = test_id("replace");
    let mut vcon = Vcon::with_id(id.clone());
    store.store_vcon(&vcon).await?;

    vcon.add_attachment("added", json!(true), Encoding::None);
    store.store_vcon(&vcon).await?;

    let fetched = store.get_vcon(&id).await?;
    assert_eq!(fetched.attachments.len(), 1, "second store should replace");
    Ok(())
}

async fn test_fetched_copy_is_detached(store: &dyn VconStore) -> Result<(), StoreError> {
    let id = test_id("detached");
    store.store_vcon(&Vcon::with_id(id.clone())).await?;

    let mut fetched = store.get_vcon(&id).await?;
    fetched.add_attachment("local", json!(null), Encoding::None);

    let again = store.get_vcon(&id).await?;
    assert!(
        again.attachments.is_empty(),
        "unsaved local mutation must not reach the store"
    );
    Ok(())
}

async fn test_delete(store: &dyn VconStore) -> Result<(), StoreError> {
    let id = test_id("delete");
    store.store_vcon(&Vcon::with_id(id.clone())).await?;

    let existed = store.delete_vcon(&id).await?;
    assert!(existed, "delete should return true for existing record");
    assert!(matches!(
        store.get_vcon(&id).await,
        Err(StoreError::NotFound(_))
    ));

    let existed = store.delete_vcon(&id).await?;
    assert!(!existed, "delete on missing record should return false");
    Ok(())
}
