//! The validation engine: accept-or-reject gates run right before a schedule
//! or role assignment is written.
//!
//! Both gates are pure functions over records the caller has already loaded.
//! The caller is responsible for running the load, the check and the write in
//! one transaction; see `rollbook-store-sqlite` for how the SQLite backend does
//! it.
//!
//! Uniqueness of `(date, department, class_type)` is not checked here. It is a
//! storage constraint and the store reports its violation as
//! [`Rejection::ScheduleSlotTaken`].

use serde::Deserialize;
use uuid::Uuid;

use crate::{
  assignment::AssignmentDetail,
  catalog::CatalogEntry,
  error::Rejection,
  schedule::{NewSchedule, Schedule},
  teacher::Teacher,
};

/// Hymn numbers accepted on a schedule.
pub const HYMN_NUMBERS: std::ops::RangeInclusive<u16> = 1..=1000;

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Knobs for assignment validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignmentPolicy {
  /// Name of the one class role that may be filled more than once per
  /// schedule (teaching assistants).
  pub multi_fill_role: String,
}

impl AssignmentPolicy {
  pub const DEFAULT_MULTI_FILL_ROLE: &'static str = "Teaching Assistant";

  pub fn new(multi_fill_role: impl Into<String>) -> Self {
    Self { multi_fill_role: multi_fill_role.into() }
  }

  pub fn is_multi_fill(&self, role: &CatalogEntry) -> bool {
    role.name == self.multi_fill_role
  }
}

impl Default for AssignmentPolicy {
  fn default() -> Self { Self::new(Self::DEFAULT_MULTI_FILL_ROLE) }
}

// ─── Schedules ───────────────────────────────────────────────────────────────

/// Check a schedule about to be created or edited.
pub fn validate_schedule(candidate: &NewSchedule) -> Result<(), Rejection> {
  if candidate.end_time <= candidate.start_time {
    return Err(Rejection::InvalidTimeRange {
      start: candidate.start_time,
      end:   candidate.end_time,
    });
  }
  if let Some(n) = candidate.hymn_number
    && !HYMN_NUMBERS.contains(&n)
  {
    return Err(Rejection::HymnNumberOutOfRange(n));
  }
  Ok(())
}

// ─── Assignments ─────────────────────────────────────────────────────────────

/// An assignment about to be written, with its references resolved.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
  /// `Some` when an existing assignment is being edited; that assignment is
  /// then never counted as a conflict with itself.
  pub assignment_id: Option<Uuid>,
  pub schedule:      &'a Schedule,
  pub role:          &'a CatalogEntry,
  pub person:        Option<&'a Teacher>,
}

impl Candidate<'_> {
  fn is_other(&self, detail: &AssignmentDetail) -> bool {
    self.assignment_id != Some(detail.assignment.assignment_id)
  }
}

/// Check an assignment about to be written.
///
/// `existing_schedules` must contain at least every schedule sharing the
/// candidate's date and department; `existing_assignments` at least every
/// assignment on the candidate's schedule or held by the candidate's person on
/// that date. Extra records are harmless.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. another schedule occupies the same department, date and time range;
/// 2. the role is already filled on this schedule (the multi-fill role is
///    exempt);
/// 3. the person already holds an assignment whose session overlaps this one.
///
/// Non-overlapping sessions on the same day are always fine, in any
/// department.
pub fn validate_assignment(
  policy: &AssignmentPolicy,
  candidate: &Candidate<'_>,
  existing_schedules: &[Schedule],
  existing_assignments: &[AssignmentDetail],
) -> Result<(), Rejection> {
  let schedule = candidate.schedule;

  if let Some(twin) = existing_schedules.iter().find(|s| {
    s.schedule_id != schedule.schedule_id && s.same_session_as(schedule)
  }) {
    return Err(Rejection::DuplicateSchedule {
      existing: twin.schedule_id,
      date:     schedule.date,
      start:    schedule.start_time,
      end:      schedule.end_time,
    });
  }

  if !policy.is_multi_fill(candidate.role)
    && let Some(filled) = existing_assignments.iter().find(|d| {
      candidate.is_other(d)
        && d.assignment.schedule_id == schedule.schedule_id
        && d.assignment.role_id == candidate.role.entry_id
    })
  {
    return Err(Rejection::RoleAlreadyFilled {
      role:        candidate.role.name.clone(),
      schedule_id: schedule.schedule_id,
      holder:      filled.person.clone(),
    });
  }

  if let Some(person) = candidate.person {
    let slot = schedule.slot();
    if let Some(conflict) = existing_assignments.iter().find(|d| {
      candidate.is_other(d)
        && d.assignment.person_id == Some(person.teacher_id)
        && d.schedule.slot().overlaps(&slot)
    }) {
      return Err(Rejection::PersonDoubleBooked {
        person:     person.name.clone(),
        role:       conflict.role.clone(),
        department: conflict.department.clone(),
        date:       conflict.schedule.date,
        start:      conflict.schedule.start_time,
        end:        conflict.schedule.end_time,
      });
    }
  }

  Ok(())
}
