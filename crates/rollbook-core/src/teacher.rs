//! Teachers and their status.
//!
//! Status decides which organisational fields a teacher may carry. Rather than
//! checking field presence at runtime, [`TeacherStatus`] only has room for the
//! fields that are valid in each state. The flat form used by forms, CSV
//! imports and database rows is converted with [`TeacherStatus::from_parts`],
//! which is the one place the rule is checked.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Rejection;

// ─── Labels ──────────────────────────────────────────────────────────────────

/// The flat status label. The program's original labels are accepted when
/// parsing.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum StatusLabel {
  #[strum(to_string = "active", serialize = "擔任中")]
  Active,
  #[strum(to_string = "inactive", serialize = "休息中")]
  Inactive,
  #[strum(to_string = "new", serialize = "新任")]
  New,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Gender {
  #[strum(to_string = "male", serialize = "男")]
  Male,
  #[strum(to_string = "female", serialize = "女")]
  Female,
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// A teacher's status together with the fields that status permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TeacherStatus {
  /// Currently serving; both a department and a position are required.
  Active { department_id: Uuid, position_id: Uuid },
  /// Resting; holds neither.
  Inactive,
  /// Newly joined; either may still be unset.
  New {
    department_id: Option<Uuid>,
    position_id:   Option<Uuid>,
  },
}

impl TeacherStatus {
  /// Build a status from its flat form.
  pub fn from_parts(
    label: StatusLabel,
    department_id: Option<Uuid>,
    position_id: Option<Uuid>,
  ) -> Result<Self, Rejection> {
    match (label, department_id, position_id) {
      (StatusLabel::Active, Some(department_id), Some(position_id)) => {
        Ok(Self::Active { department_id, position_id })
      }
      (StatusLabel::Active, ..) => Err(Rejection::InvalidTeacherStatus {
        status:      label,
        requirement: "must have both a department and a position",
      }),
      (StatusLabel::Inactive, None, None) => Ok(Self::Inactive),
      (StatusLabel::Inactive, ..) => Err(Rejection::InvalidTeacherStatus {
        status:      label,
        requirement: "must not have a department or position",
      }),
      (StatusLabel::New, department_id, position_id) => {
        Ok(Self::New { department_id, position_id })
      }
    }
  }

  pub fn label(&self) -> StatusLabel {
    match self {
      Self::Active { .. } => StatusLabel::Active,
      Self::Inactive => StatusLabel::Inactive,
      Self::New { .. } => StatusLabel::New,
    }
  }

  pub fn department_id(&self) -> Option<Uuid> {
    match *self {
      Self::Active { department_id, .. } => Some(department_id),
      Self::Inactive => None,
      Self::New { department_id, .. } => department_id,
    }
  }

  pub fn position_id(&self) -> Option<Uuid> {
    match *self {
      Self::Active { position_id, .. } => Some(position_id),
      Self::Inactive => None,
      Self::New { position_id, .. } => position_id,
    }
  }
}

// ─── Teacher ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
  pub teacher_id: Uuid,
  pub name:       String,
  #[serde(flatten)]
  pub status:     TeacherStatus,
  pub gender:     Gender,
  pub region:     Option<String>,
}

/// Flat input to [`crate::store::RosterStore::add_teacher`] and
/// [`crate::store::RosterStore::update_teacher`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacher {
  pub name:          String,
  pub status:        StatusLabel,
  #[serde(default)]
  pub department_id: Option<Uuid>,
  #[serde(default)]
  pub position_id:   Option<Uuid>,
  pub gender:        Gender,
  #[serde(default)]
  pub region:        Option<String>,
}

impl NewTeacher {
  /// Check the status rule, yielding the tagged status on success.
  pub fn status(&self) -> Result<TeacherStatus, Rejection> {
    TeacherStatus::from_parts(self.status, self.department_id, self.position_id)
  }
}
