//! Error types for `rollbook-core`.
//!
//! [`Rejection`] is the validation taxonomy: every variant means "this write
//! was refused" and carries enough detail to tell the user why. None of them
//! is fatal; the caller resubmits different data.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::{schedule::ClassType, teacher::StatusLabel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("end time {end} must be later than start time {start}")]
  InvalidTimeRange { start: NaiveTime, end: NaiveTime },

  #[error("hymn number {0} is outside 1..=1000")]
  HymnNumberOutOfRange(u16),

  #[error(
    "a schedule with the same date, time and department already exists \
     ({date} {start}-{end}, schedule {existing})"
  )]
  DuplicateSchedule {
    existing: Uuid,
    date:     NaiveDate,
    start:    NaiveTime,
    end:      NaiveTime,
  },

  #[error("a {class_type} schedule for this department already exists on {date}")]
  ScheduleSlotTaken {
    department_id: Uuid,
    date:          NaiveDate,
    class_type:    ClassType,
  },

  #[error("role '{role}' is already filled in this schedule")]
  RoleAlreadyFilled {
    role:        String,
    schedule_id: Uuid,
    holder:      Option<String>,
  },

  #[error(
    "{person} is already assigned as '{role}' in the '{department}' department \
     on {date} from {start} to {end}"
  )]
  PersonDoubleBooked {
    person:     String,
    role:       String,
    department: String,
    date:       NaiveDate,
    start:      NaiveTime,
    end:        NaiveTime,
  },

  #[error("{status} teachers {requirement}")]
  InvalidTeacherStatus {
    status:      StatusLabel,
    requirement: &'static str,
  },
}

impl Rejection {
  /// Stable machine-readable discriminant, e.g. `"person_double_booked"`.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::InvalidTimeRange { .. } => "invalid_time_range",
      Self::HymnNumberOutOfRange(_) => "hymn_number_out_of_range",
      Self::DuplicateSchedule { .. } => "duplicate_schedule",
      Self::ScheduleSlotTaken { .. } => "schedule_slot_taken",
      Self::RoleAlreadyFilled { .. } => "role_already_filled",
      Self::PersonDoubleBooked { .. } => "person_double_booked",
      Self::InvalidTeacherStatus { .. } => "invalid_teacher_status",
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Rejected(#[from] Rejection),

  #[error("unknown {kind} label: {value:?}")]
  UnknownLabel { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parse one of the label enums (status, gender, class type) from user input.
pub fn parse_label<T: std::str::FromStr>(kind: &'static str, value: &str) -> Result<T> {
  value.trim().parse().map_err(|_| Error::UnknownLabel {
    kind,
    value: value.to_owned(),
  })
}
