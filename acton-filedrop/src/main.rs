//! acton-filedrop server binary

use acton_filedrop::{config::FiledropConfig, observability, server};
use clap::Parser;
use std::path::PathBuf;

/// Upload, list and delete files in a single directory over HTTP
#[derive(Debug, Parser)]
#[command(name = "acton-filedrop", version, about)]
struct Cli {
    /// Configuration file (defaults to ./filedrop.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    observability::init()?;

    let config = FiledropConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    server::serve(config).await
}
