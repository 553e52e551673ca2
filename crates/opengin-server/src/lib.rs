//! Proxy server wiring for the OpenGIN admin tool.
//!
//! Builds an [`HttpGateway`] from [`ServerConfig`] and mounts the
//! `opengin-api` router under `/api`.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::Router;
use opengin_client::{
  BackendUrls, HttpGateway,
  config::{DEFAULT_INGESTION_API_URL, DEFAULT_READ_API_URL},
};
use opengin_core::kind::{KindEntry, StaticKinds};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `OPENGIN_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_read_api_url")]
  pub read_api_url:         String,
  #[serde(default = "default_ingestion_api_url")]
  pub ingestion_api_url:    String,
  /// Unset: the HTTP client's own default applies.
  #[serde(default)]
  pub request_timeout_secs: Option<u64>,
  /// Overrides the built-in kind catalog when present.
  #[serde(default)]
  pub kinds:                Option<Vec<KindEntry>>,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 3000 }
fn default_read_api_url() -> String { DEFAULT_READ_API_URL.to_owned() }
fn default_ingestion_api_url() -> String { DEFAULT_INGESTION_API_URL.to_owned() }

impl ServerConfig {
  /// Layer an optional TOML file under `OPENGIN_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("OPENGIN").try_parsing(true))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn backend_urls(&self) -> BackendUrls {
    BackendUrls::new(&self.read_api_url, &self.ingestion_api_url)
  }

  pub fn gateway(&self) -> anyhow::Result<HttpGateway> {
    let mut builder = HttpGateway::builder(self.backend_urls());
    if let Some(entries) = &self.kinds {
      builder = builder.catalog(StaticKinds::new(entries.clone()));
    }
    if let Some(secs) = self.request_timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("failed to build backend gateway")
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API under `/api`, with request tracing.
pub fn app(gateway: HttpGateway) -> Router {
  Router::new()
    .nest("/api", opengin_api::api_router(Arc::new(gateway)))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  fn from_toml(raw: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(raw, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "0.0.0.0:3000");
    assert_eq!(cfg.backend_urls(), BackendUrls::default());
    assert!(cfg.request_timeout_secs.is_none());
    assert!(cfg.kinds.is_none());
  }

  #[test]
  fn file_overrides_urls_and_kinds() {
    let cfg = from_toml(
      r#"
        read_api_url = "http://read:9001"
        ingestion_api_url = "http://ingest:9000"

        [[kinds]]
        major = "Place"
        minors = ["City"]
      "#,
    );
    assert_eq!(cfg.backend_urls(), BackendUrls::new("http://read:9001", "http://ingest:9000"));
    assert_eq!(cfg.kinds, Some(vec![KindEntry::new("Place", &["City"])]));
  }

  #[tokio::test]
  async fn configured_kinds_are_served() {
    let cfg = from_toml("[[kinds]]\nmajor = \"Place\"\n");
    let resp = app(cfg.gateway().unwrap())
      .oneshot(Request::get("/api/kinds").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], br#"[{"major":"Place","minors":[]}]"#);
  }

  #[tokio::test]
  async fn unreachable_backend_serves_fallback_through_api() {
    let cfg = from_toml(
      r#"
        read_api_url = "http://127.0.0.1:1"
        ingestion_api_url = "http://127.0.0.1:1"
      "#,
    );
    let resp = app(cfg.gateway().unwrap())
      .oneshot(Request::get("/api/entities/e1").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[opengin_api::DEGRADED_HEADER], "true");
  }
}
