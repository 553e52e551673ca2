//! opengin-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `OPENGIN_*` environment variables, and serves the entity proxy API on
//! `/api`.
//!
//! ```text
//! OPENGIN_READ_API_URL=http://read:8081 cargo run -p opengin-server
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use opengin_server::{ServerConfig, app};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "OpenGIN entity admin proxy")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let gateway = server_cfg.gateway()?;
  tracing::info!(
    read = %server_cfg.read_api_url,
    ingestion = %server_cfg.ingestion_api_url,
    policy = ?gateway.policy(),
    "backends configured"
  );

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(gateway)).await.context("server error")?;

  Ok(())
}
