//! Departments and the three named catalogs: positions, class roles and hymn
//! types.
//!
//! Catalog entries share one shape (a unique name and an optional
//! description), so they are modelled as a single [`CatalogEntry`] tagged with
//! its [`CatalogKind`]. Each kind is stored in its own table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Department ──────────────────────────────────────────────────────────────

/// A class group, e.g. "Kindergarten". Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub department_id: Uuid,
  pub name:          String,
  pub description:   Option<String>,
}

/// Input to [`crate::store::RosterStore::add_department`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewDepartment {
  pub name:        String,
  #[serde(default)]
  pub description: Option<String>,
}

impl NewDepartment {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), description: None }
  }
}

// ─── Catalogs ────────────────────────────────────────────────────────────────

/// Which catalog an entry belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CatalogKind {
  /// An organisational role a teacher holds, e.g. "Class Manager".
  Position,
  /// A role within a single session, e.g. "Teacher", "Pianist".
  ClassRole,
  HymnType,
}

/// A named entry in one of the catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
  pub entry_id:    Uuid,
  pub kind:        CatalogKind,
  pub name:        String,
  pub description: Option<String>,
}

/// Input to [`crate::store::RosterStore::add_catalog_entry`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCatalogEntry {
  pub name:        String,
  #[serde(default)]
  pub description: Option<String>,
}

impl NewCatalogEntry {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), description: None }
  }
}
