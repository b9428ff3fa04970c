use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use vcon_core::{Vcon, VconId};
use vcon_store::VconStore;

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Path to a vcon JSON file.
    pub file: PathBuf,
}

pub async fn run(store: &dyn VconStore, args: &PutArgs) -> anyhow::Result<()> {
    let id = put_file(store, &args.file).await?;
    println!("{id}");
    Ok(())
}

/// Read a vcon JSON file and store it. Returns the stored vcon's id.
pub async fn put_file(store: &dyn VconStore, path: &Path) -> anyhow::Result<VconId> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading vcon {}", path.display()))?;
    let vcon = Vcon::from_json(&content)
        .with_context(|| format!("decoding vcon {}", path.display()))?;
    store.store_vcon(&vcon).await?;
    info!(vcon_id = %vcon.uuid, path = %path.display(), "stored vcon");
    Ok(vcon.uuid)
}
