//! Synchronous statements run on the connection thread.
//!
//! Everything here takes a plain `&rusqlite::Connection` so it can be used
//! both on its own and inside a transaction (which derefs to a connection).
//! [`crate::SqliteStore`] wraps these in `tokio_rusqlite` calls.

use rollbook_core::{
  assignment::{AssignmentDetail, NewAssignment, RoleAssignment},
  catalog::{CatalogEntry, CatalogKind, Department},
  report::ReportNames,
  schedule::{NewSchedule, Schedule},
  store::{ScheduleQuery, TeacherQuery},
  teacher::{NewTeacher, Teacher},
  validate::{validate_assignment, validate_schedule, AssignmentPolicy, Candidate},
  Rejection,
};
use rusqlite::{Connection, OptionalExtension as _};
use uuid::Uuid;

use crate::{
  encode::{
    catalog_entity, catalog_table, encode_date, encode_time, encode_uuid,
    RawCatalogEntry, RawDepartment, RawDetail, RawSchedule, RawTeacher,
  },
  Error, Result,
};

// ─── Generic helpers ─────────────────────────────────────────────────────────

/// Whether a row keyed by `id` exists. `table` and `key` are compile-time
/// identifiers, never user input.
pub fn exists(conn: &Connection, table: &str, key: &str, id: Uuid) -> Result<bool> {
  let found = conn
    .query_row(
      &format!("SELECT 1 FROM {table} WHERE {key} = ?1"),
      rusqlite::params![encode_uuid(id)],
      |_| Ok(true),
    )
    .optional()?
    .unwrap_or(false);
  Ok(found)
}

/// Delete the row keyed by `id`; `NotFound` if nothing was deleted.
pub fn delete_row(
  conn: &Connection,
  table: &str,
  key: &str,
  entity: &'static str,
  id: Uuid,
) -> Result<()> {
  let deleted = conn.execute(
    &format!("DELETE FROM {table} WHERE {key} = ?1"),
    rusqlite::params![encode_uuid(id)],
  )?;
  if deleted == 0 {
    return Err(Error::NotFound { entity, id });
  }
  Ok(())
}

/// Move active teachers referencing `id` through `column` to `new`, so the
/// reference can be nulled without breaking the status rule.
pub fn demote_active_teachers(conn: &Connection, column: &str, id: Uuid) -> Result<usize> {
  let demoted = conn.execute(
    &format!("UPDATE teachers SET status = 'new' WHERE status = 'active' AND {column} = ?1"),
    rusqlite::params![encode_uuid(id)],
  )?;
  Ok(demoted)
}

// ─── Departments ─────────────────────────────────────────────────────────────

pub fn department(conn: &Connection, id: Uuid) -> Result<Option<Department>> {
  conn
    .query_row(
      &format!("SELECT {} FROM departments WHERE department_id = ?1", RawDepartment::COLUMNS),
      rusqlite::params![encode_uuid(id)],
      RawDepartment::read,
    )
    .optional()?
    .map(RawDepartment::into_department)
    .transpose()
}

pub fn department_by_name(conn: &Connection, name: &str) -> Result<Option<Department>> {
  conn
    .query_row(
      &format!("SELECT {} FROM departments WHERE name = ?1", RawDepartment::COLUMNS),
      rusqlite::params![name],
      RawDepartment::read,
    )
    .optional()?
    .map(RawDepartment::into_department)
    .transpose()
}

pub fn departments(conn: &Connection) -> Result<Vec<Department>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM departments ORDER BY name",
    RawDepartment::COLUMNS
  ))?;
  let raws = stmt
    .query_map([], RawDepartment::read)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawDepartment::into_department).collect()
}

pub fn insert_department(conn: &Connection, department: &Department) -> Result<()> {
  conn
    .execute(
      "INSERT INTO departments (department_id, name, description) VALUES (?1, ?2, ?3)",
      rusqlite::params![
        encode_uuid(department.department_id),
        department.name,
        department.description,
      ],
    )
    .map_err(|e| {
      Error::on_unique(e, || Error::NameTaken {
        entity: "department",
        name:   department.name.clone(),
      })
    })?;
  Ok(())
}

// ─── Catalogs ────────────────────────────────────────────────────────────────

pub fn catalog_entry(
  conn: &Connection,
  kind: CatalogKind,
  id: Uuid,
) -> Result<Option<CatalogEntry>> {
  conn
    .query_row(
      &format!(
        "SELECT {} FROM {} WHERE entry_id = ?1",
        RawCatalogEntry::COLUMNS,
        catalog_table(kind)
      ),
      rusqlite::params![encode_uuid(id)],
      RawCatalogEntry::read,
    )
    .optional()?
    .map(|raw| raw.into_entry(kind))
    .transpose()
}

pub fn catalog_entry_by_name(
  conn: &Connection,
  kind: CatalogKind,
  name: &str,
) -> Result<Option<CatalogEntry>> {
  conn
    .query_row(
      &format!(
        "SELECT {} FROM {} WHERE name = ?1",
        RawCatalogEntry::COLUMNS,
        catalog_table(kind)
      ),
      rusqlite::params![name],
      RawCatalogEntry::read,
    )
    .optional()?
    .map(|raw| raw.into_entry(kind))
    .transpose()
}

pub fn catalog(conn: &Connection, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM {} ORDER BY name",
    RawCatalogEntry::COLUMNS,
    catalog_table(kind)
  ))?;
  let raws = stmt
    .query_map([], RawCatalogEntry::read)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(|raw| raw.into_entry(kind)).collect()
}

pub fn insert_catalog_entry(conn: &Connection, entry: &CatalogEntry) -> Result<()> {
  conn
    .execute(
      &format!(
        "INSERT INTO {} (entry_id, name, description) VALUES (?1, ?2, ?3)",
        catalog_table(entry.kind)
      ),
      rusqlite::params![encode_uuid(entry.entry_id), entry.name, entry.description],
    )
    .map_err(|e| {
      Error::on_unique(e, || Error::NameTaken {
        entity: catalog_entity(entry.kind),
        name:   entry.name.clone(),
      })
    })?;
  Ok(())
}

// ─── Teachers ────────────────────────────────────────────────────────────────

pub fn teacher(conn: &Connection, id: Uuid) -> Result<Option<Teacher>> {
  conn
    .query_row(
      &format!("SELECT {} FROM teachers WHERE teacher_id = ?1", RawTeacher::COLUMNS),
      rusqlite::params![encode_uuid(id)],
      RawTeacher::read,
    )
    .optional()?
    .map(RawTeacher::into_teacher)
    .transpose()
}

pub fn teachers(conn: &Connection, query: &TeacherQuery) -> Result<Vec<Teacher>> {
  let department = query.department_id.map(encode_uuid);
  let status = query.status.map(|s| s.to_string());

  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM teachers
     WHERE (?1 IS NULL OR department_id = ?1)
       AND (?2 IS NULL OR status = ?2)
     ORDER BY name",
    RawTeacher::COLUMNS
  ))?;
  let raws = stmt
    .query_map(rusqlite::params![department, status], RawTeacher::read)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawTeacher::into_teacher).collect()
}

/// Check the status rule and the references of a teacher input, yielding
/// the record to write.
pub fn resolve_teacher(conn: &Connection, id: Uuid, input: NewTeacher) -> Result<Teacher> {
  let status = input.status()?;
  if let Some(department_id) = status.department_id()
    && !exists(conn, "departments", "department_id", department_id)?
  {
    return Err(Error::NotFound { entity: "department", id: department_id });
  }
  if let Some(position_id) = status.position_id()
    && !exists(conn, "positions", "entry_id", position_id)?
  {
    return Err(Error::NotFound { entity: "position", id: position_id });
  }
  Ok(Teacher {
    teacher_id: id,
    name: input.name,
    status,
    gender: input.gender,
    region: input.region,
  })
}

/// Insert or overwrite `teacher`. Returns `NotFound` when overwriting a
/// missing row.
pub fn write_teacher(conn: &Connection, teacher: &Teacher, overwrite: bool) -> Result<()> {
  let sql = if overwrite {
    "UPDATE teachers
     SET name = ?2, status = ?3, department_id = ?4, position_id = ?5,
         gender = ?6, region = ?7
     WHERE teacher_id = ?1"
  } else {
    "INSERT INTO teachers
       (teacher_id, name, status, department_id, position_id, gender, region)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
  };
  let written = conn.execute(
    sql,
    rusqlite::params![
      encode_uuid(teacher.teacher_id),
      teacher.name,
      teacher.status.label().to_string(),
      teacher.status.department_id().map(encode_uuid),
      teacher.status.position_id().map(encode_uuid),
      teacher.gender.to_string(),
      teacher.region,
    ],
  )?;
  if written == 0 {
    return Err(Error::NotFound { entity: "teacher", id: teacher.teacher_id });
  }
  Ok(())
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Department and hymn type names keyed by id.
pub fn report_names(conn: &Connection) -> Result<ReportNames> {
  Ok(ReportNames {
    departments: departments(conn)?
      .into_iter()
      .map(|d| (d.department_id, d.name))
      .collect(),
    hymn_types:  catalog(conn, CatalogKind::HymnType)?
      .into_iter()
      .map(|e| (e.entry_id, e.name))
      .collect(),
  })
}

// ─── Schedules ───────────────────────────────────────────────────────────────

pub fn schedule(conn: &Connection, id: Uuid) -> Result<Option<Schedule>> {
  conn
    .query_row(
      &format!("SELECT {} FROM schedules WHERE schedule_id = ?1", RawSchedule::COLUMNS),
      rusqlite::params![encode_uuid(id)],
      RawSchedule::read,
    )
    .optional()?
    .map(RawSchedule::into_schedule)
    .transpose()
}

pub fn schedules(conn: &Connection, query: &ScheduleQuery) -> Result<Vec<Schedule>> {
  let department = query.department_id.map(encode_uuid);
  let from = query.from.map(encode_date);
  let to = query.to.map(encode_date);

  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM schedules
     WHERE (?1 IS NULL OR department_id = ?1)
       AND (?2 IS NULL OR date >= ?2)
       AND (?3 IS NULL OR date <= ?3)
     ORDER BY date, start_time",
    RawSchedule::COLUMNS
  ))?;
  let raws = stmt
    .query_map(rusqlite::params![department, from, to], RawSchedule::read)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut out: Vec<Schedule> =
    raws.into_iter().map(RawSchedule::into_schedule).collect::<Result<_>>()?;
  if !query.class_types.is_empty() {
    out.retain(|s| query.class_types.contains(&s.class_type));
  }
  Ok(out)
}

/// Insert or overwrite `schedule`, mapping the `(date, department,
/// class_type)` constraint to [`Rejection::ScheduleSlotTaken`].
pub fn write_schedule(conn: &Connection, schedule: &Schedule, overwrite: bool) -> Result<()> {
  let sql = if overwrite {
    "UPDATE schedules
     SET department_id = ?2, date = ?3, start_time = ?4, end_time = ?5,
         class_type = ?6, topic = ?7, unit_number = ?8, hymn_type_id = ?9,
         hymn_number = ?10
     WHERE schedule_id = ?1"
  } else {
    "INSERT INTO schedules
       (schedule_id, department_id, date, start_time, end_time, class_type,
        topic, unit_number, hymn_type_id, hymn_number)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
  };
  let written = conn
    .execute(
      sql,
      rusqlite::params![
        encode_uuid(schedule.schedule_id),
        encode_uuid(schedule.department_id),
        encode_date(schedule.date),
        encode_time(schedule.start_time),
        encode_time(schedule.end_time),
        schedule.class_type.to_string(),
        schedule.topic,
        schedule.unit_number,
        schedule.hymn_type_id.map(encode_uuid),
        schedule.hymn_number,
      ],
    )
    .map_err(|e| {
      Error::on_unique(e, || {
        Error::Rejected(Rejection::ScheduleSlotTaken {
          department_id: schedule.department_id,
          date:          schedule.date,
          class_type:    schedule.class_type,
        })
      })
    })?;
  if written == 0 {
    return Err(Error::NotFound { entity: "schedule", id: schedule.schedule_id });
  }
  Ok(())
}

/// Validate a schedule input and write it under `id`.
pub fn save_schedule(
  conn: &Connection,
  id: Uuid,
  input: NewSchedule,
  overwrite: bool,
) -> Result<Schedule> {
  validate_schedule(&input)?;

  if !exists(conn, "departments", "department_id", input.department_id)? {
    return Err(Error::NotFound { entity: "department", id: input.department_id });
  }
  if let Some(hymn_type_id) = input.hymn_type_id
    && !exists(conn, "hymn_types", "entry_id", hymn_type_id)?
  {
    return Err(Error::NotFound { entity: "hymn type", id: hymn_type_id });
  }

  let schedule = input.into_schedule(id);
  write_schedule(conn, &schedule, overwrite)?;
  Ok(schedule)
}

// ─── Assignments ─────────────────────────────────────────────────────────────

/// Filter for [`details`]. Unset fields match everything.
#[derive(Debug, Default)]
pub struct DetailFilter {
  pub assignment_id: Option<Uuid>,
  pub schedule_id:   Option<Uuid>,
  pub person_id:     Option<Uuid>,
  pub department_id: Option<Uuid>,
  pub role:          Option<String>,
  pub date:          Option<chrono::NaiveDate>,
}

pub fn details(conn: &Connection, filter: &DetailFilter) -> Result<Vec<AssignmentDetail>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {}
     FROM role_assignments a
     JOIN schedules   s ON s.schedule_id   = a.schedule_id
     JOIN departments d ON d.department_id = s.department_id
     JOIN class_roles r ON r.entry_id      = a.role_id
     LEFT JOIN teachers t ON t.teacher_id  = a.person_id
     WHERE (?1 IS NULL OR a.assignment_id = ?1)
       AND (?2 IS NULL OR a.schedule_id   = ?2)
       AND (?3 IS NULL OR a.person_id     = ?3)
       AND (?4 IS NULL OR s.department_id = ?4)
       AND (?5 IS NULL OR r.name          = ?5)
       AND (?6 IS NULL OR s.date          = ?6)
     ORDER BY s.date, s.start_time, d.name, r.name",
    RawDetail::COLUMNS
  ))?;
  let raws = stmt
    .query_map(
      rusqlite::params![
        filter.assignment_id.map(encode_uuid),
        filter.schedule_id.map(encode_uuid),
        filter.person_id.map(encode_uuid),
        filter.department_id.map(encode_uuid),
        filter.role.as_deref(),
        filter.date.map(encode_date),
      ],
      RawDetail::read,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawDetail::into_detail).collect()
}

/// Resolve, validate and write an assignment under `id`, either as a new row
/// or over the existing one when `overwrite` is set.
///
/// Must run inside a transaction: the rows read here are the ones the
/// validation engine judges, and nothing may change them before the write.
pub fn save_assignment(
  conn: &Connection,
  policy: &AssignmentPolicy,
  id: Uuid,
  input: NewAssignment,
  overwrite: bool,
) -> Result<RoleAssignment> {
  if overwrite && !exists(conn, "role_assignments", "assignment_id", id)? {
    return Err(Error::NotFound { entity: "assignment", id });
  }

  let schedule = schedule(conn, input.schedule_id)?
    .ok_or(Error::NotFound { entity: "schedule", id: input.schedule_id })?;
  let role = catalog_entry(conn, CatalogKind::ClassRole, input.role_id)?
    .ok_or(Error::NotFound { entity: "class role", id: input.role_id })?;
  let person = match input.person_id {
    Some(person_id) => Some(
      teacher(conn, person_id)?
        .ok_or(Error::NotFound { entity: "teacher", id: person_id })?,
    ),
    None => None,
  };

  let same_day = schedules(conn, &ScheduleQuery {
    department_id: Some(schedule.department_id),
    from: Some(schedule.date),
    to: Some(schedule.date),
    ..Default::default()
  })?;

  let mut related = details(conn, &DetailFilter {
    schedule_id: Some(schedule.schedule_id),
    ..Default::default()
  })?;
  if let Some(person) = &person {
    related.extend(details(conn, &DetailFilter {
      person_id: Some(person.teacher_id),
      date: Some(schedule.date),
      ..Default::default()
    })?);
  }

  let candidate = Candidate {
    assignment_id: overwrite.then_some(id),
    schedule:      &schedule,
    role:          &role,
    person:        person.as_ref(),
  };
  validate_assignment(policy, &candidate, &same_day, &related)?;

  let assignment = RoleAssignment {
    assignment_id: id,
    schedule_id:   schedule.schedule_id,
    role_id:       role.entry_id,
    person_id:     person.map(|p| p.teacher_id),
  };
  let sql = if overwrite {
    "UPDATE role_assignments SET schedule_id = ?2, role_id = ?3, person_id = ?4
     WHERE assignment_id = ?1"
  } else {
    "INSERT INTO role_assignments (assignment_id, schedule_id, role_id, person_id)
     VALUES (?1, ?2, ?3, ?4)"
  };
  conn.execute(
    sql,
    rusqlite::params![
      encode_uuid(assignment.assignment_id),
      encode_uuid(assignment.schedule_id),
      encode_uuid(assignment.role_id),
      assignment.person_id.map(encode_uuid),
    ],
  )?;
  Ok(assignment)
}
