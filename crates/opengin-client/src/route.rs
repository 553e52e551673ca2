//! Static mapping from logical operation to backend, method and path.
//!
//! | Operation | Backend | Method | Path |
//! |-----------|---------|--------|------|
//! | search / list | READ | `POST` | `/v1/entities/search` |
//! | get by id | READ | `POST` | `/v1/entities/search` |
//! | create | INGESTION | `POST` | `/entities` |
//! | update | INGESTION | `PUT` | `/entities/{id}` |
//!
//! The READ service has no listing endpoint, so every read is a search.

use opengin_core::{Error, Result};
use reqwest::{Method, Url};

use crate::config::BackendUrls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
  Read,
  Ingestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
  Search,
  GetById,
  Create,
  Update(&'a str),
}

/// Where and how one operation is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
  pub backend:  Backend,
  pub method:   Method,
  /// Unencoded path segments, appended to the backend base URL.
  pub segments: Vec<String>,
}

impl Route {
  /// The path as it appears in the routing table (segments unencoded).
  pub fn path(&self) -> String { format!("/{}", self.segments.join("/")) }
}

/// Resolve `op`. Depends only on the operation, never on payload content.
pub fn route(op: Operation<'_>) -> Route {
  let segs = |s: &[&str]| -> Vec<String> { s.iter().map(|p| (*p).to_owned()).collect() };
  match op {
    Operation::Search | Operation::GetById => Route {
      backend:  Backend::Read,
      method:   Method::POST,
      segments: segs(&["v1", "entities", "search"]),
    },
    Operation::Create => Route {
      backend:  Backend::Ingestion,
      method:   Method::POST,
      segments: segs(&["entities"]),
    },
    Operation::Update(id) => Route {
      backend:  Backend::Ingestion,
      method:   Method::PUT,
      segments: segs(&["entities", id]),
    },
  }
}

impl BackendUrls {
  pub fn base(&self, backend: Backend) -> &str {
    match backend {
      Backend::Read => &self.read,
      Backend::Ingestion => &self.ingestion,
    }
  }

  /// Absolute URL for `route`. Segments are percent-encoded, so an id
  /// containing `/` stays a single segment.
  pub fn resolve(&self, route: &Route) -> Result<Url> {
    let base = self.base(route.backend);
    let mut url = Url::parse(base)
      .map_err(|e| Error::Transport(format!("invalid backend url {base:?}: {e}")))?;
    url
      .path_segments_mut()
      .map_err(|()| Error::Transport(format!("backend url {base:?} cannot be a base")))?
      .pop_if_empty()
      .extend(&route.segments);
    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn routing_table() {
    let cases = [
      (Operation::Search, Backend::Read, Method::POST, "/v1/entities/search"),
      (Operation::GetById, Backend::Read, Method::POST, "/v1/entities/search"),
      (Operation::Create, Backend::Ingestion, Method::POST, "/entities"),
      (Operation::Update("p1"), Backend::Ingestion, Method::PUT, "/entities/p1"),
    ];
    for (op, backend, method, path) in cases {
      let r = route(op);
      assert_eq!(r.backend, backend, "{op:?}");
      assert_eq!(r.method, method, "{op:?}");
      assert_eq!(r.path(), path, "{op:?}");
    }
  }

  #[test]
  fn resolve_uses_the_routed_backend() {
    let urls = BackendUrls::new("http://read:8081/", "http://ingest:8080");
    assert_eq!(
      urls.resolve(&route(Operation::Search)).unwrap().as_str(),
      "http://read:8081/v1/entities/search"
    );
    assert_eq!(
      urls.resolve(&route(Operation::Create)).unwrap().as_str(),
      "http://ingest:8080/entities"
    );
  }

  #[test]
  fn resolve_keeps_base_path_prefix() {
    let urls = BackendUrls::new("http://gw/read/", "http://gw/ingest");
    assert_eq!(
      urls.resolve(&route(Operation::Update("p1"))).unwrap().as_str(),
      "http://gw/ingest/entities/p1"
    );
  }

  #[test]
  fn update_id_is_encoded_as_one_segment() {
    let urls = BackendUrls::default();
    let url = urls.resolve(&route(Operation::Update("a/b c"))).unwrap();
    assert_eq!(url.path(), "/entities/a%2Fb%20c");
  }

  #[test]
  fn malformed_base_url_is_an_error() {
    let urls = BackendUrls::new("not a url", "http://ok");
    assert!(urls.resolve(&route(Operation::Search)).is_err());
  }
}
