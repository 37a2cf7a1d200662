//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` and times as `HH:MM:SS`, so string
//! comparison in SQL matches chronological order. UUIDs are stored as
//! hyphenated lowercase strings; enums as their canonical lowercase labels.

use chrono::{NaiveDate, NaiveTime};
use rollbook_core::{
  assignment::{AssignmentDetail, RoleAssignment},
  catalog::{CatalogEntry, CatalogKind, Department},
  schedule::{ClassType, Schedule},
  teacher::{Gender, StatusLabel, Teacher, TeacherStatus},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("bad date {s:?}: {e}")))
}

pub fn encode_time(t: NaiveTime) -> String { t.format(TIME_FORMAT).to_string() }

pub fn decode_time(s: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(s, TIME_FORMAT)
    .map_err(|e| Error::Decode(format!("bad time {s:?}: {e}")))
}

/// Parse one of the strum-backed label enums.
fn decode_label<T: std::str::FromStr>(what: &str, s: &str) -> Result<T> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown {what}: {s:?}")))
}

// ─── Catalog tables ──────────────────────────────────────────────────────────

pub fn catalog_table(kind: CatalogKind) -> &'static str {
  match kind {
    CatalogKind::Position => "positions",
    CatalogKind::ClassRole => "class_roles",
    CatalogKind::HymnType => "hymn_types",
  }
}

pub fn catalog_entity(kind: CatalogKind) -> &'static str {
  match kind {
    CatalogKind::Position => "position",
    CatalogKind::ClassRole => "class role",
    CatalogKind::HymnType => "hymn type",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `departments` row.
pub struct RawDepartment {
  pub department_id: String,
  pub name:          String,
  pub description:   Option<String>,
}

impl RawDepartment {
  pub const COLUMNS: &'static str = "department_id, name, description";

  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      department_id: row.get(0)?,
      name:          row.get(1)?,
      description:   row.get(2)?,
    })
  }

  pub fn into_department(self) -> Result<Department> {
    Ok(Department {
      department_id: decode_uuid(&self.department_id)?,
      name:          self.name,
      description:   self.description,
    })
  }
}

/// Raw strings read from any of the catalog tables.
pub struct RawCatalogEntry {
  pub entry_id:    String,
  pub name:        String,
  pub description: Option<String>,
}

impl RawCatalogEntry {
  pub const COLUMNS: &'static str = "entry_id, name, description";

  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      entry_id:    row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
    })
  }

  pub fn into_entry(self, kind: CatalogKind) -> Result<CatalogEntry> {
    Ok(CatalogEntry {
      entry_id: decode_uuid(&self.entry_id)?,
      kind,
      name: self.name,
      description: self.description,
    })
  }
}

/// Raw strings read directly from a `teachers` row.
pub struct RawTeacher {
  pub teacher_id:    String,
  pub name:          String,
  pub status:        String,
  pub department_id: Option<String>,
  pub position_id:   Option<String>,
  pub gender:        String,
  pub region:        Option<String>,
}

impl RawTeacher {
  pub const COLUMNS: &'static str =
    "teacher_id, name, status, department_id, position_id, gender, region";

  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      teacher_id:    row.get(0)?,
      name:          row.get(1)?,
      status:        row.get(2)?,
      department_id: row.get(3)?,
      position_id:   row.get(4)?,
      gender:        row.get(5)?,
      region:        row.get(6)?,
    })
  }

  pub fn into_teacher(self) -> Result<Teacher> {
    let label: StatusLabel = decode_label("teacher status", &self.status)?;
    let status = TeacherStatus::from_parts(
      label,
      decode_opt_uuid(self.department_id)?,
      decode_opt_uuid(self.position_id)?,
    )
    .map_err(|e| Error::Decode(format!("stored teacher breaks status rule: {e}")))?;

    Ok(Teacher {
      teacher_id: decode_uuid(&self.teacher_id)?,
      name: self.name,
      status,
      gender: decode_label::<Gender>("gender", &self.gender)?,
      region: self.region,
    })
  }
}

/// Raw strings read from a `schedules` row, optionally as part of a join.
pub struct RawSchedule {
  pub schedule_id:   String,
  pub department_id: String,
  pub date:          String,
  pub start_time:    String,
  pub end_time:      String,
  pub class_type:    String,
  pub topic:         Option<String>,
  pub unit_number:   Option<String>,
  pub hymn_type_id:  Option<String>,
  pub hymn_number:   Option<i64>,
}

impl RawSchedule {
  pub const COLUMNS: &'static str = "schedule_id, department_id, date, \
    start_time, end_time, class_type, topic, unit_number, hymn_type_id, \
    hymn_number";
  pub const WIDTH: usize = 10;

  /// Read the schedule columns starting at column `at`.
  pub fn read_at(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      schedule_id:   row.get(at)?,
      department_id: row.get(at + 1)?,
      date:          row.get(at + 2)?,
      start_time:    row.get(at + 3)?,
      end_time:      row.get(at + 4)?,
      class_type:    row.get(at + 5)?,
      topic:         row.get(at + 6)?,
      unit_number:   row.get(at + 7)?,
      hymn_type_id:  row.get(at + 8)?,
      hymn_number:   row.get(at + 9)?,
    })
  }

  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Self::read_at(row, 0)
  }

  pub fn into_schedule(self) -> Result<Schedule> {
    let hymn_number = self
      .hymn_number
      .map(|n| {
        u16::try_from(n)
          .map_err(|_| Error::Decode(format!("hymn number out of range: {n}")))
      })
      .transpose()?;

    Ok(Schedule {
      schedule_id: decode_uuid(&self.schedule_id)?,
      department_id: decode_uuid(&self.department_id)?,
      date: decode_date(&self.date)?,
      start_time: decode_time(&self.start_time)?,
      end_time: decode_time(&self.end_time)?,
      class_type: decode_label::<ClassType>("class type", &self.class_type)?,
      topic: self.topic,
      unit_number: self.unit_number,
      hymn_type_id: decode_opt_uuid(self.hymn_type_id)?,
      hymn_number,
    })
  }
}

/// An assignment row joined with its schedule, department, role and person.
pub struct RawDetail {
  pub assignment_id: String,
  pub role_id:       String,
  pub person_id:     Option<String>,
  pub schedule:      RawSchedule,
  pub department:    String,
  pub role:          String,
  pub person:        Option<String>,
}

impl RawDetail {
  /// Column order expected by [`RawDetail::read`].
  pub const COLUMNS: &'static str = "a.assignment_id, a.role_id, a.person_id, \
    s.schedule_id, s.department_id, s.date, s.start_time, s.end_time, \
    s.class_type, s.topic, s.unit_number, s.hymn_type_id, s.hymn_number, \
    d.name, r.name, t.name";

  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let after = 3 + RawSchedule::WIDTH;
    Ok(Self {
      assignment_id: row.get(0)?,
      role_id:       row.get(1)?,
      person_id:     row.get(2)?,
      schedule:      RawSchedule::read_at(row, 3)?,
      department:    row.get(after)?,
      role:          row.get(after + 1)?,
      person:        row.get(after + 2)?,
    })
  }

  pub fn into_detail(self) -> Result<AssignmentDetail> {
    let schedule = self.schedule.into_schedule()?;
    Ok(AssignmentDetail {
      assignment: RoleAssignment {
        assignment_id: decode_uuid(&self.assignment_id)?,
        schedule_id:   schedule.schedule_id,
        role_id:       decode_uuid(&self.role_id)?,
        person_id:     decode_opt_uuid(self.person_id)?,
      },
      schedule,
      department: self.department,
      role: self.role,
      person: self.person,
    })
  }
}
