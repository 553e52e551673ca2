//! The major/minor kind taxonomy, exposed as an injectable catalog.
//!
//! The list aggregator asks a [`KindCatalog`] which major kinds exist instead
//! of hardwiring them, so new kinds can be configured without touching the
//! fan-out logic.

use serde::{Deserialize, Serialize};

use crate::Result;

pub const PERSON: &str = "Person";
pub const ORGANIZATION: &str = "Organization";
pub const DATASET: &str = "Dataset";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Source of the known kinds.
pub trait KindCatalog: Send + Sync {
  /// Every major kind, in the order listing should query them.
  fn major_kinds(&self) -> Result<Vec<String>>;

  /// Minor kinds valid under `major`; empty for an unknown major kind.
  fn minor_kinds(&self, major: &str) -> Vec<String>;
}

// ─── Static catalog ──────────────────────────────────────────────────────────

/// One major kind together with its minor kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindEntry {
  pub major:  String,
  #[serde(default)]
  pub minors: Vec<String>,
}

impl KindEntry {
  pub fn new(major: &str, minors: &[&str]) -> Self {
    Self {
      major:  major.to_owned(),
      minors: minors.iter().map(|m| (*m).to_owned()).collect(),
    }
  }
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticKinds {
  entries: Vec<KindEntry>,
}

impl StaticKinds {
  pub fn new(entries: Vec<KindEntry>) -> Self { Self { entries } }

  /// The kinds the OpenGIN platform ships with.
  pub fn opengin() -> Self {
    Self::new(vec![
      KindEntry::new(PERSON, &["Citizen"]),
      KindEntry::new(ORGANIZATION, &["Government", "Private", "Non-Profit"]),
      KindEntry::new(DATASET, &["Tabular", "Document"]),
    ])
  }

  pub fn entries(&self) -> &[KindEntry] { &self.entries }
}

impl Default for StaticKinds {
  fn default() -> Self { Self::opengin() }
}

impl KindCatalog for StaticKinds {
  fn major_kinds(&self) -> Result<Vec<String>> {
    Ok(self.entries.iter().map(|e| e.major.clone()).collect())
  }

  fn minor_kinds(&self, major: &str) -> Vec<String> {
    self
      .entries
      .iter()
      .find(|e| e.major == major)
      .map(|e| e.minors.clone())
      .unwrap_or_default()
  }
}
