//! Backend base URLs and request policy.

use std::time::Duration;

pub const DEFAULT_READ_API_URL: &str = "http://0.0.0.0:8081";
pub const DEFAULT_INGESTION_API_URL: &str = "http://0.0.0.0:8080";

pub const READ_API_URL_ENV: &str = "OPENGIN_READ_API_URL";
pub const INGESTION_API_URL_ENV: &str = "OPENGIN_INGESTION_API_URL";

/// Base URLs of the two OpenGIN services. Each is configured independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUrls {
  /// Search service (`/v1/entities/search`).
  pub read:      String,
  /// Create/update service (`/entities`).
  pub ingestion: String,
}

impl Default for BackendUrls {
  fn default() -> Self {
    Self {
      read:      DEFAULT_READ_API_URL.to_owned(),
      ingestion: DEFAULT_INGESTION_API_URL.to_owned(),
    }
  }
}

impl BackendUrls {
  pub fn new(read: impl Into<String>, ingestion: impl Into<String>) -> Self {
    Self { read: read.into(), ingestion: ingestion.into() }
  }
}

/// Timeout and retry settings for backend calls.
///
/// The gateway records the policy but no call path retries; only an explicit
/// [`GatewayBuilder::timeout`](crate::GatewayBuilder::timeout) changes
/// transport behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
  pub timeout:        Duration,
  pub retry_attempts: u32,
  pub retry_delay:    Duration,
}

impl Default for RequestPolicy {
  fn default() -> Self {
    Self {
      timeout:        Duration::from_secs(30),
      retry_attempts: 3,
      retry_delay:    Duration::from_secs(1),
    }
  }
}
