//! Error types for `opengin-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The backend answered with a non-success status. `body` is the raw
  /// response text, kept verbatim so the caller can see what went wrong.
  #[error("backend error {status} {status_text}: {body}")]
  Backend {
    status:      u16,
    status_text: String,
    body:        String,
  },

  /// The request never produced a response (connect failure, timeout, …).
  #[error("transport error: {0}")]
  Transport(String),

  /// The backend answered 2xx but the body was not the expected shape.
  #[error("unexpected response body: {0}")]
  Decode(String),

  #[error("invalid entity: {0}")]
  Invalid(String),

  #[error("kind catalog unavailable: {0}")]
  KindCatalog(String),
}

impl Error {
  /// The backend HTTP status, if this error carries one.
  pub fn status(&self) -> Option<u16> {
    match self {
      Error::Backend { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
