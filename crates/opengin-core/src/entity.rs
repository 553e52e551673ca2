//! Entity — the sole domain record managed through the access layer.
//!
//! Field names follow the OpenGIN wire format (camelCase). Timestamps are
//! kept as the ISO-8601 strings the backend sends so that records pass
//! through this layer untouched; [`Entity::created_at`] parses on demand.
//!
//! Decoding is lenient: an optional field that is absent or `null` takes its
//! empty value, and fields this layer does not model are kept in `extra` at
//! every level so they are written back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Two-level classification of an entity. The major kind is the fan-out key
/// for listing; the minor kind is drawn from a set that depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind {
  pub major: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub minor: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Kind {
  pub fn new(major: impl Into<String>, minor: impl Into<String>) -> Self {
    Self { major: major.into(), minor: minor.into(), extra: Map::new() }
  }
}

// ─── Sub-structures ──────────────────────────────────────────────────────────

/// A time-bounded value. An empty `end_time` means the value is still in
/// effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedValue {
  #[serde(default, deserialize_with = "null_as_default")]
  pub value:      String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub start_time: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub end_time:   String,
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

impl TimeBasedValue {
  /// A value in effect since `start_time`.
  pub fn since(value: impl Into<String>, start_time: impl Into<String>) -> Self {
    Self { value: value.into(), start_time: start_time.into(), ..Self::default() }
  }

  pub fn is_current(&self) -> bool { self.end_time.is_empty() }
}

/// One `key = value` pair. Keys are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
  #[serde(default, deserialize_with = "null_as_default")]
  pub key:   String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub value: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// An OpenGIN entity.
///
/// `attributes` and `relationships` are opaque to this layer. Only `id` and
/// `kind` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
  pub id:            String,
  pub kind:          Kind,
  #[serde(default, deserialize_with = "null_as_default")]
  pub created:       String,
  /// Empty while the entity is still active.
  #[serde(default, deserialize_with = "null_as_default")]
  pub terminated:    String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name:          TimeBasedValue,
  #[serde(default, deserialize_with = "null_as_default")]
  pub metadata:      Vec<MetadataEntry>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub attributes:    Vec<Value>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub relationships: Vec<Value>,
  #[serde(flatten)]
  pub extra:         Map<String, Value>,
}

impl Entity {
  /// A bare entity with the given id and kind; every other field is empty.
  pub fn new(id: impl Into<String>, kind: Kind) -> Self {
    Self {
      id: id.into(),
      kind,
      created: String::new(),
      terminated: String::new(),
      name: TimeBasedValue::default(),
      metadata: Vec::new(),
      attributes: Vec::new(),
      relationships: Vec::new(),
      extra: Map::new(),
    }
  }

  pub fn is_active(&self) -> bool { self.terminated.is_empty() }

  /// `created` parsed as RFC 3339, or `None` if absent or malformed.
  pub fn created_at(&self) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&self.created)
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
  }

  /// Values of every metadata entry with this key, in insertion order.
  pub fn metadata_values<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Iterator<Item = &'a str> + 'a {
    self
      .metadata
      .iter()
      .filter(move |m| m.key == key)
      .map(|m| m.value.as_str())
  }
}

/// `null` decodes like an absent field.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn decodes_wire_format() {
    let raw = json!({
      "id": "p1",
      "kind": { "major": "Person", "minor": "Citizen" },
      "created": "2024-03-17T10:00:00Z",
      "terminated": "",
      "name": { "value": "Ada", "startTime": "2024-03-17T10:00:00Z", "endTime": "" },
      "metadata": [{ "key": "a", "value": "1" }, { "key": "a", "value": "2" }],
      "attributes": [{ "anything": true }],
      "relationships": []
    });
    let e: Entity = serde_json::from_value(raw).unwrap();
    assert_eq!(e.kind, Kind::new("Person", "Citizen"));
    assert!(e.is_active());
    assert!(e.name.is_current());
    assert_eq!(e.created_at().unwrap().to_rfc3339(), "2024-03-17T10:00:00+00:00");
    assert_eq!(e.metadata_values("a").collect::<Vec<_>>(), ["1", "2"]);
    assert!(e.extra.is_empty());
  }

  #[test]
  fn missing_optional_fields_default() {
    let e: Entity =
      serde_json::from_value(json!({ "id": "x", "kind": { "major": "Dataset" } }))
        .unwrap();
    assert_eq!(e.kind.minor, "");
    assert!(e.metadata.is_empty());
    assert!(e.created_at().is_none());
  }

  #[test]
  fn unknown_fields_survive_reserialisation() {
    let raw = json!({
      "id": "x",
      "kind": { "major": "Person", "minor": "Citizen" },
      "created": "",
      "terminated": "2025-01-01T00:00:00Z",
      "name": { "value": "", "startTime": "", "endTime": "" },
      "metadata": [],
      "attributes": [],
      "relationships": [],
      "version": 7
    });
    let e: Entity = serde_json::from_value(raw.clone()).unwrap();
    assert!(!e.is_active());
    assert_eq!(e.extra.get("version"), Some(&json!(7)));
    assert_eq!(serde_json::to_value(&e).unwrap(), raw);
  }

  #[test]
  fn null_fields_decode_as_empty() {
    let raw = json!({
      "id": "x",
      "kind": { "major": "Person", "minor": null },
      "created": null,
      "terminated": null,
      "name": { "value": "Ada", "startTime": null, "endTime": null },
      "metadata": null,
      "attributes": null,
      "relationships": null
    });
    let e: Entity = serde_json::from_value(raw).unwrap();
    assert!(e.is_active());
    assert!(e.name.is_current());
    assert_eq!(e.name.value, "Ada");
    assert_eq!(e.kind.minor, "");
    assert!(e.metadata.is_empty());
    assert!(e.extra.is_empty());
  }

  #[test]
  fn nested_unknown_fields_survive_reserialisation() {
    let raw = json!({
      "id": "x",
      "kind": { "major": "Person", "minor": "Citizen", "scheme": "v2" },
      "created": "",
      "terminated": "",
      "name": { "value": "Ada", "startTime": "", "endTime": "", "lang": "si" },
      "metadata": [{ "key": "a", "value": "1", "source": "gazette" }],
      "attributes": [],
      "relationships": []
    });
    let e: Entity = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(e.name.extra.get("lang"), Some(&json!("si")));
    assert_eq!(e.metadata[0].extra.get("source"), Some(&json!("gazette")));
    assert_eq!(serde_json::to_value(&e).unwrap(), raw);
  }

  #[test]
  fn entity_without_kind_is_rejected() {
    assert!(serde_json::from_value::<Entity>(json!({ "id": "x" })).is_err());
  }
}
