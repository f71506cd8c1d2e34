//! CLI binary for the tool curator.

use std::path::PathBuf;

use clap::Parser;
use curator::{run_update, CuratorConfig, JsonFileStore};
use tracing_subscriber::EnvFilter;

/// Refresh the merged, ranked AI tool catalog from every enabled source.
#[derive(Parser)]
#[command(name = "tool-curator", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog file to update (overrides `store.path`).
    #[arg(short, long)]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries only the summary line.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("curator=info,curator_sources=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => CuratorConfig::from_file(path)?,
        None => CuratorConfig::default(),
    };
    if let Some(store) = cli.store {
        config.store.path = store;
    }
    config.validate()?;

    let store = JsonFileStore::new(&config.store.path);
    let scorer = config.scoring.build_scorer();

    let summary = run_update(
        &store,
        &config.sources.enabled,
        &config.sources,
        scorer.as_ref(),
    )
    .await?;

    println!("Updated {} tools → {}", summary.total, store.path().display());
    Ok(())
}
