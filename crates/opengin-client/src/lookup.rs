//! Single-entity lookup via an `{ "id": … }` search.

use opengin_core::{
  Error, Result,
  gateway::Lookup,
  search::{SearchBody, SearchQuery},
};
use reqwest::StatusCode;
use tracing::{error, warn};

use crate::{HttpGateway, client::backend_error, route::Operation};

impl HttpGateway {
  /// 404 is a plain [`Lookup::NotFound`]. Any other failure is logged and
  /// answered from the fallback store.
  pub(crate) async fn lookup_by_id(&self, id: &str) -> Lookup {
    match self.fetch_by_id(id).await {
      Ok(Some(body)) => body.into_match(id).map_or(Lookup::NotFound, Lookup::Found),
      Ok(None) => Lookup::NotFound,
      Err(e) => {
        error!(id, error = %e, "entity lookup failed");
        let fallback = self.fallback.find(id).cloned();
        if fallback.is_some() {
          warn!(id, "serving fallback entity");
        }
        Lookup::Degraded(fallback)
      }
    }
  }

  /// `Ok(None)` on 404.
  async fn fetch_by_id(&self, id: &str) -> Result<Option<SearchBody>> {
    let resp = self.dispatch(Operation::GetById, &SearchQuery::by_id(id)).await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !resp.status().is_success() {
      return Err(backend_error(resp).await);
    }
    resp
      .json()
      .await
      .map(Some)
      .map_err(|e| Error::Decode(e.to_string()))
  }
}
