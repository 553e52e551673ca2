//! [`HttpGateway`]: the reqwest-backed [`EntityGateway`].

use std::{sync::Arc, time::Duration};

use opengin_core::{
  Error, Result,
  entity::Entity,
  fallback::FallbackStore,
  gateway::{EntityGateway, Listing, Lookup},
  kind::{KindCatalog, StaticKinds},
  search::{SearchBody, SearchQuery},
};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
  config::{BackendUrls, RequestPolicy},
  route::{Operation, route},
};

/// Async access layer over the OpenGIN READ and INGESTION services.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based and the
/// catalog and fallback data are shared read-only.
#[derive(Clone)]
pub struct HttpGateway {
  pub(crate) client:   Client,
  pub(crate) urls:     BackendUrls,
  pub(crate) catalog:  Arc<dyn KindCatalog>,
  pub(crate) fallback: Arc<FallbackStore>,
  pub(crate) policy:   RequestPolicy,
}

impl HttpGateway {
  /// A gateway with the built-in kind catalog and the sample fallback data.
  pub fn new(urls: BackendUrls) -> Result<Self> { Self::builder(urls).build() }

  pub fn builder(urls: BackendUrls) -> GatewayBuilder {
    GatewayBuilder {
      urls,
      catalog: Arc::new(StaticKinds::opengin()),
      fallback: Arc::new(FallbackStore::sample()),
      timeout: None,
    }
  }

  pub fn urls(&self) -> &BackendUrls { &self.urls }

  pub fn policy(&self) -> &RequestPolicy { &self.policy }

  /// Send `body` as JSON along the route for `op`.
  ///
  /// Only failures to obtain a response are errors here; status handling is
  /// left to the caller.
  pub(crate) async fn dispatch<B>(&self, op: Operation<'_>, body: &B) -> Result<Response>
  where
    B: Serialize + ?Sized,
  {
    let route = route(op);
    let url = self.urls.resolve(&route)?;
    debug!(method = %route.method, %url, "dispatching request");
    self
      .client
      .request(route.method, url)
      .json(body)
      .send()
      .await
      .map_err(|e| Error::Transport(e.to_string()))
  }
}

/// Turn a non-success response into [`Error::Backend`], keeping the raw body.
pub(crate) async fn backend_error(resp: Response) -> Error {
  let status = resp.status();
  let body = resp.text().await.unwrap_or_default();
  Error::Backend {
    status: status.as_u16(),
    status_text: status.canonical_reason().unwrap_or_default().to_owned(),
    body,
  }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Configures an [`HttpGateway`]; obtained from [`HttpGateway::builder`].
pub struct GatewayBuilder {
  urls:     BackendUrls,
  catalog:  Arc<dyn KindCatalog>,
  fallback: Arc<FallbackStore>,
  timeout:  Option<Duration>,
}

impl GatewayBuilder {
  pub fn catalog(mut self, catalog: impl KindCatalog + 'static) -> Self {
    self.catalog = Arc::new(catalog);
    self
  }

  pub fn fallback(mut self, fallback: FallbackStore) -> Self {
    self.fallback = Arc::new(fallback);
    self
  }

  /// Per-request timeout. Without one the transport default applies.
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  pub fn build(self) -> Result<HttpGateway> {
    let mut builder = Client::builder();
    if let Some(timeout) = self.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder
      .build()
      .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
    Ok(HttpGateway {
      client,
      urls: self.urls,
      catalog: self.catalog,
      fallback: self.fallback,
      policy: RequestPolicy::default(),
    })
  }
}

// ─── EntityGateway ────────────────────────────────────────────────────────────

impl EntityGateway for HttpGateway {
  async fn search(&self, query: &SearchQuery) -> Result<Vec<Entity>> {
    let resp = self.dispatch(Operation::Search, query).await?;
    if !resp.status().is_success() {
      return Err(backend_error(resp).await);
    }
    let body: SearchBody = resp
      .json()
      .await
      .map_err(|e| Error::Decode(e.to_string()))?;
    let decoded = body.into_results();
    if decoded.skipped > 0 {
      warn!(skipped = decoded.skipped, "dropped undecodable search results");
    }
    Ok(decoded.entities)
  }

  async fn list_detailed(&self) -> Listing { self.list_all().await }

  async fn lookup(&self, id: &str) -> Lookup { self.lookup_by_id(id).await }

  async fn create(&self, entity: &Entity) -> Result<Entity> {
    self.send_entity(Operation::Create, entity).await
  }

  async fn update(&self, entity: &Entity) -> Result<Entity> {
    self.send_entity(Operation::Update(&entity.id), entity).await
  }

  fn kinds(&self) -> Result<Vec<(String, Vec<String>)>> {
    Ok(
      self
        .catalog
        .major_kinds()?
        .into_iter()
        .map(|major| {
          let minors = self.catalog.minor_kinds(&major);
          (major, minors)
        })
        .collect(),
    )
  }
}
