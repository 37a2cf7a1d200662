//! Role assignments: which teacher fills which class role in a schedule.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::Schedule;

/// Binds a person to a class role for one schedule. `person_id` is `None`
/// while the slot is unassigned, and becomes `None` again if the teacher is
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
  pub assignment_id: Uuid,
  pub schedule_id:   Uuid,
  pub role_id:       Uuid,
  pub person_id:     Option<Uuid>,
}

/// Input to [`crate::store::RosterStore::assign`] and
/// [`crate::store::RosterStore::reassign`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewAssignment {
  pub schedule_id: Uuid,
  pub role_id:     Uuid,
  #[serde(default)]
  pub person_id:   Option<Uuid>,
}

impl NewAssignment {
  pub fn new(schedule_id: Uuid, role_id: Uuid, person_id: Option<Uuid>) -> Self {
    Self { schedule_id, role_id, person_id }
  }
}

/// An assignment joined with its schedule and the display names of the
/// department, role and person. This is the read model both the validation
/// engine and the reports work from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDetail {
  pub assignment: RoleAssignment,
  pub schedule:   Schedule,
  pub department: String,
  pub role:       String,
  pub person:     Option<String>,
}
