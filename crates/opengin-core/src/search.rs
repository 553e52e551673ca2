//! Wire types for the READ service's `/v1/entities/search` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::Entity;

// ─── Request ─────────────────────────────────────────────────────────────────

/// Kind criterion of a search. Only `major` is sent by the access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindQuery {
  pub major: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub minor: Option<String>,
}

/// Body of a search request: `{ "kind": { "major": … } }` or `{ "id": … }`.
///
/// Unset criteria are omitted from the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<KindQuery>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:   Option<String>,
}

impl SearchQuery {
  pub fn by_kind(major: impl Into<String>) -> Self {
    Self {
      kind: Some(KindQuery { major: major.into(), minor: None }),
      id:   None,
    }
  }

  pub fn by_id(id: impl Into<String>) -> Self {
    Self { kind: None, id: Some(id.into()) }
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// A successful search response: a JSON array or a JSON object.
///
/// Elements are kept as raw JSON and decoded one at a time, so a malformed
/// record costs only itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SearchBody {
  List(Vec<Value>),
  Object(Map<String, Value>),
}

/// Entities recovered from a [`SearchBody`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
  pub entities: Vec<Entity>,
  /// Elements that were present but did not decode as an entity.
  pub skipped:  usize,
}

impl Decoded {
  fn from_values(values: Vec<Value>) -> Self {
    let mut decoded = Decoded::default();
    for value in values {
      match serde_json::from_value(value) {
        Ok(entity) => decoded.entities.push(entity),
        Err(_) => decoded.skipped += 1,
      }
    }
    decoded
  }
}

impl SearchBody {
  /// Normalise for listing: an array is used as-is; an object contributes its
  /// `entities` array, or nothing.
  pub fn into_entities(self) -> Decoded {
    match self {
      SearchBody::List(values) => Decoded::from_values(values),
      SearchBody::Object(mut map) => match map.remove("entities") {
        Some(Value::Array(values)) => Decoded::from_values(values),
        _ => Decoded::default(),
      },
    }
  }

  /// Like [`into_entities`](Self::into_entities), but an object without an
  /// `entities` field is taken as a lone entity.
  pub fn into_results(self) -> Decoded {
    match self {
      SearchBody::Object(map) if !map.contains_key("entities") => {
        match serde_json::from_value(Value::Object(map)) {
          Ok(entity) => Decoded { entities: vec![entity], skipped: 0 },
          Err(_) => Decoded::default(),
        }
      }
      other => other.into_entities(),
    }
  }

  /// The entity whose id is exactly `id`, if the body holds one.
  pub fn into_match(self, id: &str) -> Option<Entity> {
    self.into_results().entities.into_iter().find(|e| e.id == id)
  }
}
