//! Binary entry point: CLI parsing, logging, program launch.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bibliotea::app::App;
use bibliotea::config::{Config, DEFAULT_API_URL};

#[derive(Debug, Parser)]
#[command(
    name = "bibliotea",
    version,
    about = "Terminal client for the book-recommendation service"
)]
struct Cli {
    /// Base URL of the recommendation service.
    #[arg(long, env = "BIBLIOTEA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Append logs to this file (stdout belongs to the UI).
    #[arg(long, env = "BIBLIOTEA_LOG")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    Config::set_global(Config {
        api_url: cli.api_url,
        log_file: cli.log_file,
    });

    let program = bubbletea_rs::Program::<App>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()?;
    program.run().await?;
    Ok(())
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
