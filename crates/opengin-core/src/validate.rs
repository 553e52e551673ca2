//! Minimal shape checks applied before an entity is sent for ingestion.

use crate::{Error, Result, entity::Entity};

pub const MIN_ID_LENGTH: usize = 1;
pub const MAX_ID_LENGTH: usize = 100;
pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 255;

/// Reject entities the ingestion service could never accept.
///
/// Lengths are counted in characters, not bytes.
pub fn validate(entity: &Entity) -> Result<()> {
  let id_len = entity.id.chars().count();
  if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&id_len) {
    return Err(Error::Invalid(format!(
      "id must be {MIN_ID_LENGTH}-{MAX_ID_LENGTH} characters, got {id_len}"
    )));
  }

  if entity.kind.major.is_empty() {
    return Err(Error::Invalid("kind.major must not be empty".into()));
  }

  let name_len = entity.name.value.chars().count();
  if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name_len) {
    return Err(Error::Invalid(format!(
      "name must be {MIN_NAME_LENGTH}-{MAX_NAME_LENGTH} characters, got {name_len}"
    )));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::Kind;

  fn entity(id: &str) -> Entity {
    let mut e = Entity::new(id, Kind::new("Person", "Citizen"));
    e.name.value = "Ada".into();
    e
  }

  #[test]
  fn id_length_bounds() {
    assert!(validate(&entity("")).is_err());
    assert!(validate(&entity("a")).is_ok());
    assert!(validate(&entity(&"a".repeat(100))).is_ok());
    assert!(validate(&entity(&"a".repeat(101))).is_err());
  }

  #[test]
  fn multibyte_ids_count_characters() {
    assert!(validate(&entity(&"é".repeat(100))).is_ok());
  }

  #[test]
  fn empty_major_kind_rejected() {
    let mut e = entity("x");
    e.kind.major.clear();
    assert!(matches!(validate(&e), Err(Error::Invalid(_))));
  }

  #[test]
  fn name_length_bounds() {
    let mut e = entity("x");
    e.name.value.clear();
    assert!(validate(&e).is_err());
    e.name.value = "n".repeat(255);
    assert!(validate(&e).is_ok());
    e.name.value.push('n');
    assert!(validate(&e).is_err());
  }
}
