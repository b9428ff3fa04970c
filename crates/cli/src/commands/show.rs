use clap::Args;

use vcon_core::VconId;
use vcon_store::VconStore;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Identifier of the vcon to print.
    pub vcon_id: VconId,
}

pub async fn run(store: &dyn VconStore, args: &ShowArgs) -> anyhow::Result<()> {
    let vcon = store.get_vcon(&args.vcon_id).await?;
    println!("{}", serde_json::to_string_pretty(&vcon)?);
    Ok(())
}
