//! Static sample data served when the READ backend cannot be reached.
//!
//! The store is built once and never mutated; callers share it behind an
//! `Arc` and tests substitute their own.

use crate::entity::{Entity, Kind, TimeBasedValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackStore {
  entities: Vec<Entity>,
}

impl FallbackStore {
  pub fn new(entities: Vec<Entity>) -> Self { Self { entities } }

  /// No fallback data: degraded reads come back empty.
  pub fn empty() -> Self { Self::default() }

  /// The single placeholder record the admin UI shows while offline.
  pub fn sample() -> Self {
    let mut entity = Entity::new("e1", Kind::new("example", "test"));
    entity.created = "2024-03-17T10:00:00Z".to_owned();
    entity.name = TimeBasedValue::since("Sample Entity", "2024-03-17T10:00:00Z");
    Self::new(vec![entity])
  }

  pub fn entities(&self) -> &[Entity] { &self.entities }

  pub fn find(&self, id: &str) -> Option<&Entity> {
    self.entities.iter().find(|e| e.id == id)
  }
}
