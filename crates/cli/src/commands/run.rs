use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use vcon_core::VconId;
use vcon_link::Link;
use vcon_link_sample::SampleLink;
use vcon_store::VconStore;

use crate::commands::put::put_file;
use crate::config::LinkConfig;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Identifier of the vcon to process.
    pub vcon_id: VconId,
    /// Label passed to the link (defaults to `[link].name` from config).
    #[arg(long)]
    pub link_name: Option<String>,
    /// JSON options mapping (string or @file path). Overrides `[link].options`.
    #[arg(long)]
    pub options: Option<String>,
    /// Vcon JSON file to load into the store before running.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Print the processed vcon instead of just its id.
    #[arg(long)]
    pub show: bool,
}

fn parse_options(raw: &str) -> anyhow::Result<serde_json::Value> {
    let value = if let Some(path) = raw.strip_prefix('@') {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading options {path}"))?;
        serde_json::from_str(&content)?
    } else {
        serde_json::from_str(raw)?
    };
    Ok(value)
}

pub async fn run(
    store: Arc<dyn VconStore>,
    link_config: &LinkConfig,
    args: &RunArgs,
) -> anyhow::Result<()> {
    let output = execute(store, link_config, args).await?;
    println!("{output}");
    Ok(())
}

/// Run the link and return what should be printed.
async fn execute(
    store: Arc<dyn VconStore>,
    link_config: &LinkConfig,
    args: &RunArgs,
) -> anyhow::Result<String> {
    if let Some(ref input) = args.input {
        put_file(store.as_ref(), input).await?;
    }

    let options = match args.options {
        Some(ref raw) => Some(parse_options(raw)?),
        None => link_config.options.clone(),
    };
    let link_name = args.link_name.as_deref().unwrap_or(&link_config.name);

    let link = SampleLink::new(Arc::clone(&store));
    let vcon_id = link.run(&args.vcon_id, link_name, options.as_ref()).await?;

    if args.show {
        let vcon = store.get_vcon(&vcon_id).await?;
        return Ok(serde_json::to_string_pretty(&vcon)?);
    }
    Ok(vcon_id.to_string())
}
