//! The `EntityGateway` trait and the outcome types of its read paths.
//!
//! Implemented by `opengin-client` against the live READ/INGESTION services.
//! Higher layers (`opengin-api`, `opengin-cli`) depend on this abstraction.
//!
//! Reads never fail: backend trouble is folded into [`Listing::degraded`] or
//! [`Lookup::Degraded`]. Writes always surface failure.

use std::future::Future;

use serde::Serialize;

use crate::{Result, entity::Entity, search::SearchQuery};

// ─── Listing ─────────────────────────────────────────────────────────────────

/// What one per-kind search branch produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BranchOutcome {
  /// 2xx; the number of entities this branch contributed, and of elements
  /// dropped because they did not decode as entities.
  Found { count: usize, skipped: usize },
  /// 404: no entities of this kind. Not an error.
  Missing,
  /// Any other non-success status.
  BackendError { status: u16, status_text: String },
  /// No response at all.
  TransportError { message: String },
  /// 2xx, but the body was neither a JSON array nor a JSON object.
  DecodeError { message: String },
}

impl BranchOutcome {
  pub fn is_failure(&self) -> bool {
    matches!(
      self,
      Self::BackendError { .. } | Self::TransportError { .. } | Self::DecodeError { .. }
    )
  }

  /// Whether this branch lost any records, whole-branch failures included.
  pub fn lost_records(&self) -> bool {
    match self {
      Self::Found { skipped, .. } => *skipped > 0,
      other => other.is_failure(),
    }
  }
}

/// The aggregated result of listing every known kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
  pub entities:      Vec<Entity>,
  /// One entry per major kind queried, in catalog order.
  pub outcomes:      Vec<(String, BranchOutcome)>,
  /// `true` when `entities` is the fallback sample.
  pub from_fallback: bool,
}

impl Listing {
  /// Whether any part of the result was lost or substituted.
  pub fn degraded(&self) -> bool {
    self.from_fallback || self.outcomes.iter().any(|(_, o)| o.lost_records())
  }
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// Result of fetching a single entity by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
  Found(Entity),
  /// The backend reported no such entity.
  NotFound,
  /// The backend could not answer; carries the fallback entry, if any.
  Degraded(Option<Entity>),
}

impl Lookup {
  pub fn into_option(self) -> Option<Entity> {
    match self {
      Lookup::Found(e) => Some(e),
      Lookup::NotFound => None,
      Lookup::Degraded(e) => e,
    }
  }

  pub fn is_degraded(&self) -> bool { matches!(self, Self::Degraded(_)) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the OpenGIN backends as seen by UI collaborators.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait EntityGateway: Send + Sync {
  /// Run one raw search against the READ service. Unlike the other read
  /// paths, every non-success status (404 included) is returned as an error.
  fn search<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<Vec<Entity>>> + Send + 'a;

  /// Every entity of every known major kind, with per-kind outcomes.
  fn list_detailed(&self) -> impl Future<Output = Listing> + Send + '_;

  /// Every entity of every known major kind. Never fails.
  fn list(&self) -> impl Future<Output = Vec<Entity>> + Send + '_ {
    async move { self.list_detailed().await.entities }
  }

  /// Look up a single entity, distinguishing absence from degradation.
  fn lookup<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Lookup> + Send + 'a;

  /// The entity with this id, the fallback entry when the backend is down,
  /// or `None`.
  fn get_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Option<Entity>> + Send + 'a {
    async move { self.lookup(id).await.into_option() }
  }

  /// Create `entity`; returns the record as persisted by the backend.
  fn create<'a>(
    &'a self,
    entity: &'a Entity,
  ) -> impl Future<Output = Result<Entity>> + Send + 'a;

  /// Replace the record stored under `entity.id`; returns the persisted
  /// record.
  fn update<'a>(
    &'a self,
    entity: &'a Entity,
  ) -> impl Future<Output = Result<Entity>> + Send + 'a;

  /// Major kinds with their minor kinds, for form pickers.
  fn kinds(&self) -> Result<Vec<(String, Vec<String>)>>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_branches_are_not_degradation() {
    let listing = Listing {
      entities:      vec![],
      outcomes:      vec![
        ("Person".into(), BranchOutcome::Found { count: 0, skipped: 0 }),
        ("Organization".into(), BranchOutcome::Missing),
      ],
      from_fallback: false,
    };
    assert!(!listing.degraded());
  }

  #[test]
  fn failed_branch_or_fallback_is_degradation() {
    let mut listing = Listing {
      outcomes: vec![(
        "Person".into(),
        BranchOutcome::TransportError { message: "refused".into() },
      )],
      ..Listing::default()
    };
    assert!(listing.degraded());
    listing.outcomes.clear();
    listing.from_fallback = true;
    assert!(listing.degraded());
  }

  #[test]
  fn skipped_elements_are_degradation() {
    let listing = Listing {
      outcomes: vec![("Person".into(), BranchOutcome::Found { count: 2, skipped: 1 })],
      ..Listing::default()
    };
    assert!(listing.degraded());
    assert!(!listing.outcomes[0].1.is_failure());
  }

  #[test]
  fn lookup_collapses_to_option() {
    assert!(Lookup::NotFound.into_option().is_none());
    assert!(Lookup::Degraded(None).into_option().is_none());
    let e = Entity::new("e1", crate::entity::Kind::new("example", "test"));
    assert_eq!(Lookup::Degraded(Some(e.clone())).into_option(), Some(e));
  }
}
