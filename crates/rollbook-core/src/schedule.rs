//! Schedules: single dated, timed class sessions within a department.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of session. At most one schedule of each kind exists per
/// department per date.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ClassType {
  #[strum(to_string = "worship", serialize = "崇拜")]
  Worship,
  #[strum(to_string = "hymn", serialize = "詩頌")]
  Hymn,
  #[strum(to_string = "activity", serialize = "共習")]
  Activity,
  #[strum(to_string = "pianica", serialize = "口風琴")]
  Pianica,
}

// ─── Time slots ──────────────────────────────────────────────────────────────

/// The `[start, end)` interval a session occupies on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
  pub date:  NaiveDate,
  pub start: NaiveTime,
  pub end:   NaiveTime,
}

impl TimeSlot {
  /// Strict overlap on the same date: touching intervals do not overlap.
  /// Sessions never cross midnight, so dates are compared as-is.
  pub fn overlaps(&self, other: &TimeSlot) -> bool {
    self.date == other.date && other.start < self.end && other.end > self.start
  }
}

// ─── Schedule ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
  pub schedule_id:   Uuid,
  pub department_id: Uuid,
  pub date:          NaiveDate,
  pub start_time:    NaiveTime,
  pub end_time:      NaiveTime,
  pub class_type:    ClassType,
  pub topic:         Option<String>,
  pub unit_number:   Option<String>,
  pub hymn_type_id:  Option<Uuid>,
  /// Hymn book number, 1..=1000.
  pub hymn_number:   Option<u16>,
}

impl Schedule {
  pub fn slot(&self) -> TimeSlot {
    TimeSlot { date: self.date, start: self.start_time, end: self.end_time }
  }

  /// Whether `other` occupies the same department, date and time range.
  pub fn same_session_as(&self, other: &Schedule) -> bool {
    self.department_id == other.department_id && self.slot() == other.slot()
  }
}

/// Input to [`crate::store::RosterStore::create_schedule`] and
/// [`crate::store::RosterStore::update_schedule`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewSchedule {
  pub department_id: Uuid,
  pub date:          NaiveDate,
  pub start_time:    NaiveTime,
  pub end_time:      NaiveTime,
  pub class_type:    ClassType,
  #[serde(default)]
  pub topic:         Option<String>,
  #[serde(default)]
  pub unit_number:   Option<String>,
  #[serde(default)]
  pub hymn_type_id:  Option<Uuid>,
  #[serde(default)]
  pub hymn_number:   Option<u16>,
}

impl NewSchedule {
  /// Convenience constructor with all optional fields unset.
  pub fn new(
    department_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    class_type: ClassType,
  ) -> Self {
    Self {
      department_id,
      date,
      start_time,
      end_time,
      class_type,
      topic: None,
      unit_number: None,
      hymn_type_id: None,
      hymn_number: None,
    }
  }

  /// Materialise the record the store will write under `schedule_id`.
  pub fn into_schedule(self, schedule_id: Uuid) -> Schedule {
    Schedule {
      schedule_id,
      department_id: self.department_id,
      date: self.date,
      start_time: self.start_time,
      end_time: self.end_time,
      class_type: self.class_type,
      topic: self.topic,
      unit_number: self.unit_number,
      hymn_type_id: self.hymn_type_id,
      hymn_number: self.hymn_number,
    }
  }
}
