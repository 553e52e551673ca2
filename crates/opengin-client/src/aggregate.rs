//! "List all entities" as a per-kind search fan-out.
//!
//! The READ service can only search, so listing issues one
//! `{ "kind": { "major": K } }` search per major kind in the catalog, waits
//! for every branch to settle, and concatenates what came back. Each branch
//! is classified on its own; a failing branch contributes nothing and never
//! disturbs its siblings.

use futures::future::join_all;
use opengin_core::{
  entity::Entity,
  gateway::{BranchOutcome, Listing},
  search::{SearchBody, SearchQuery},
};
use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::{HttpGateway, route::Operation};

impl HttpGateway {
  pub(crate) async fn list_all(&self) -> Listing {
    let kinds = match self.catalog.major_kinds() {
      Ok(kinds) => kinds,
      Err(e) => {
        warn!(error = %e, "cannot enumerate kinds; serving fallback entities");
        return Listing {
          entities:      self.fallback.entities().to_vec(),
          outcomes:      Vec::new(),
          from_fallback: true,
        };
      }
    };

    let branches = join_all(kinds.iter().map(|major| self.search_kind(major))).await;

    let mut listing = Listing::default();
    for (major, (outcome, entities)) in kinds.into_iter().zip(branches) {
      listing.entities.extend(entities);
      listing.outcomes.push((major, outcome));
    }
    debug!(
      count = listing.entities.len(),
      degraded = listing.degraded(),
      "listed entities"
    );
    listing
  }

  async fn search_kind(&self, major: &str) -> (BranchOutcome, Vec<Entity>) {
    let query = SearchQuery::by_kind(major);
    let resp = match self.dispatch(Operation::Search, &query).await {
      Ok(resp) => resp,
      Err(e) => {
        error!(kind = major, error = %e, "search request failed");
        return (BranchOutcome::TransportError { message: e.to_string() }, Vec::new());
      }
    };

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
      debug!(kind = major, "no entities of this kind");
      return (BranchOutcome::Missing, Vec::new());
    }
    if !status.is_success() {
      let status_text = status.canonical_reason().unwrap_or_default().to_owned();
      error!(kind = major, status = status.as_u16(), %status_text, "search returned an error");
      return (
        BranchOutcome::BackendError { status: status.as_u16(), status_text },
        Vec::new(),
      );
    }

    match resp.json::<SearchBody>().await {
      Ok(body) => {
        let decoded = body.into_entities();
        if decoded.skipped > 0 {
          warn!(kind = major, skipped = decoded.skipped, "dropped undecodable search results");
        }
        let outcome = BranchOutcome::Found {
          count:   decoded.entities.len(),
          skipped: decoded.skipped,
        };
        (outcome, decoded.entities)
      }
      Err(e) => {
        error!(kind = major, error = %e, "undecodable search response");
        (BranchOutcome::DecodeError { message: e.to_string() }, Vec::new())
      }
    }
  }
}
