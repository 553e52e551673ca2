//! `opengin` — command-line access to OpenGIN entities.
//!
//! # Usage
//!
//! ```text
//! opengin list
//! opengin get e1
//! opengin create entity.json
//! opengin --read-url http://localhost:8081 update - < entity.json
//! opengin --config ~/.config/opengin/config.toml kinds
//! ```

mod commands;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use opengin_client::{
  BackendUrls, HttpGateway,
  config::{DEFAULT_INGESTION_API_URL, DEFAULT_READ_API_URL, INGESTION_API_URL_ENV, READ_API_URL_ENV},
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "opengin", about = "Read, create and update OpenGIN entities")]
struct Args {
  /// Path to a TOML config file (read_api_url, ingestion_api_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the READ service (default: http://0.0.0.0:8081).
  #[arg(long, env = READ_API_URL_ENV)]
  read_url: Option<String>,

  /// Base URL of the INGESTION service (default: http://0.0.0.0:8080).
  #[arg(long, env = INGESTION_API_URL_ENV)]
  ingestion_url: Option<String>,

  /// Per-request timeout in seconds.
  #[arg(long, value_name = "SECS")]
  timeout: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every entity of every known major kind.
  List {
    /// Also print per-kind outcomes and whether the result is degraded.
    #[arg(long)]
    detailed: bool,
  },
  /// Fetch one entity by id.
  Get { id: String },
  /// Create an entity from a JSON file (`-` for stdin).
  Create { file: PathBuf },
  /// Replace an entity from a JSON file (`-` for stdin).
  Update { file: PathBuf },
  /// Print the major kinds and their minor kinds.
  Kinds,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  read_api_url:      String,
  #[serde(default)]
  ingestion_api_url: String,
}

/// CLI flags (or their env vars) override the config file, which overrides
/// defaults.
fn resolve_urls(args: &Args, file_cfg: &ConfigFile) -> BackendUrls {
  let pick = |flag: &Option<String>, file: &str, default: &str| {
    flag
      .clone()
      .filter(|v| !v.is_empty())
      .or_else(|| (!file.is_empty()).then(|| file.to_owned()))
      .unwrap_or_else(|| default.to_owned())
  };
  BackendUrls::new(
    pick(&args.read_url, &file_cfg.read_api_url, DEFAULT_READ_API_URL),
    pick(&args.ingestion_url, &file_cfg.ingestion_api_url, DEFAULT_INGESTION_API_URL),
  )
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so stdout stays pure JSON.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let mut builder = HttpGateway::builder(resolve_urls(&args, &file_cfg));
  if let Some(secs) = args.timeout {
    builder = builder.timeout(Duration::from_secs(secs));
  }
  let gateway = builder.build().context("building backend gateway")?;

  commands::run(&gateway, args.command, &mut std::io::stdout().lock()).await
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["opengin"];
    argv.extend_from_slice(extra);
    argv.push("kinds");
    Args::try_parse_from(argv).unwrap()
  }

  #[test]
  fn flags_beat_file_beat_defaults() {
    let file_cfg = ConfigFile {
      read_api_url:      "http://file-read".into(),
      ingestion_api_url: "http://file-ingest".into(),
    };
    let urls = resolve_urls(&args(&["--read-url", "http://flag-read"]), &file_cfg);
    assert_eq!(urls, BackendUrls::new("http://flag-read", "http://file-ingest"));
  }

  #[test]
  fn config_file_parses() {
    let cfg: ConfigFile = toml::from_str(r#"read_api_url = "http://r""#).unwrap();
    assert_eq!(cfg.read_api_url, "http://r");
    assert!(cfg.ingestion_api_url.is_empty());
  }
}
