//! [`SqliteStore`], the SQLite implementation of [`RosterStore`].

use std::{path::Path, sync::Arc};

use rusqlite::TransactionBehavior;
use uuid::Uuid;

use rollbook_core::{
  assignment::{AssignmentDetail, NewAssignment, RoleAssignment},
  catalog::{CatalogEntry, CatalogKind, Department, NewCatalogEntry, NewDepartment},
  report::{build_class_report, build_report, ReportLayout, ReportRow},
  schedule::{ClassType, NewSchedule, Schedule},
  store::{AssignmentQuery, RosterStore, ScheduleQuery, TeacherQuery},
  teacher::{NewTeacher, Teacher},
  validate::AssignmentPolicy,
};

use crate::{
  encode::{catalog_entity, catalog_table},
  query::{self, DetailFilter},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A rollbook store backed by a single SQLite file.
///
/// Cloning is cheap; the connection and the policy are shared.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  policy: Arc<AssignmentPolicy>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, policy: Arc::new(AssignmentPolicy::default()) })
  }

  /// Replace the assignment policy (e.g. the multi-fill role name).
  pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
    self.policy = Arc::new(policy);
    self
  }

  pub fn policy(&self) -> &AssignmentPolicy { &self.policy }

  /// Run `f` on the connection thread.
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&rusqlite::Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }

  /// Run `f` inside an immediate transaction. The transaction commits only
  /// if `f` succeeds; a rejection or any other error rolls it back.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&rusqlite::Transaction<'_>) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx);
        if out.is_ok() {
          tx.commit()?;
        }
        Ok(out)
      })
      .await?
  }
}

/// Log a refused write at `info`; other failures are left to the caller.
fn trace_rejection<T>(op: &'static str, result: Result<T>) -> Result<T> {
  if let Err(err) = &result
    && let Some(rejection) = err.rejection()
  {
    tracing::info!(op, kind = rejection.kind(), "write rejected: {rejection}");
  }
  result
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── Departments ───────────────────────────────────────────────────────────

  async fn add_department(&self, input: NewDepartment) -> Result<Department> {
    let department = Department {
      department_id: Uuid::new_v4(),
      name:          input.name,
      description:   input.description,
    };
    let row = department.clone();
    self.write(move |tx| query::insert_department(tx, &row)).await?;

    tracing::debug!(id = %department.department_id, name = %department.name, "added department");
    Ok(department)
  }

  async fn get_department(&self, id: Uuid) -> Result<Option<Department>> {
    self.read(move |conn| query::department(conn, id)).await
  }

  async fn find_department(&self, name: &str) -> Result<Option<Department>> {
    let name = name.to_owned();
    self.read(move |conn| query::department_by_name(conn, &name)).await
  }

  async fn list_departments(&self) -> Result<Vec<Department>> {
    self.read(query::departments).await
  }

  async fn delete_department(&self, id: Uuid) -> Result<()> {
    let demoted = self
      .write(move |tx| {
        let demoted = query::demote_active_teachers(tx, "department_id", id)?;
        query::delete_row(tx, "departments", "department_id", "department", id)?;
        Ok(demoted)
      })
      .await?;

    tracing::debug!(%id, demoted, "deleted department");
    Ok(())
  }

  // ── Catalogs ──────────────────────────────────────────────────────────────

  async fn add_catalog_entry(
    &self,
    kind:  CatalogKind,
    input: NewCatalogEntry,
  ) -> Result<CatalogEntry> {
    let entry = CatalogEntry {
      entry_id:    Uuid::new_v4(),
      kind,
      name:        input.name,
      description: input.description,
    };
    let row = entry.clone();
    self.write(move |tx| query::insert_catalog_entry(tx, &row)).await?;

    tracing::debug!(%kind, id = %entry.entry_id, name = %entry.name, "added catalog entry");
    Ok(entry)
  }

  async fn find_catalog_entry(
    &self,
    kind: CatalogKind,
    name: &str,
  ) -> Result<Option<CatalogEntry>> {
    let name = name.to_owned();
    self
      .read(move |conn| query::catalog_entry_by_name(conn, kind, &name))
      .await
  }

  async fn list_catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
    self.read(move |conn| query::catalog(conn, kind)).await
  }

  async fn delete_catalog_entry(&self, kind: CatalogKind, id: Uuid) -> Result<()> {
    self
      .write(move |tx| {
        if kind == CatalogKind::Position {
          query::demote_active_teachers(tx, "position_id", id)?;
        }
        query::delete_row(tx, catalog_table(kind), "entry_id", catalog_entity(kind), id)
      })
      .await?;

    tracing::debug!(%kind, %id, "deleted catalog entry");
    Ok(())
  }

  // ── Teachers ──────────────────────────────────────────────────────────────

  async fn add_teacher(&self, input: NewTeacher) -> Result<Teacher> {
    let id = Uuid::new_v4();
    let result = self
      .write(move |tx| {
        let teacher = query::resolve_teacher(tx, id, input)?;
        query::write_teacher(tx, &teacher, false)?;
        Ok(teacher)
      })
      .await;
    let teacher = trace_rejection("add_teacher", result)?;

    tracing::debug!(id = %teacher.teacher_id, name = %teacher.name, "added teacher");
    Ok(teacher)
  }

  async fn update_teacher(&self, id: Uuid, input: NewTeacher) -> Result<Teacher> {
    let result = self
      .write(move |tx| {
        let teacher = query::resolve_teacher(tx, id, input)?;
        query::write_teacher(tx, &teacher, true)?;
        Ok(teacher)
      })
      .await;
    trace_rejection("update_teacher", result)
  }

  async fn get_teacher(&self, id: Uuid) -> Result<Option<Teacher>> {
    self.read(move |conn| query::teacher(conn, id)).await
  }

  async fn list_teachers(&self, query: &TeacherQuery) -> Result<Vec<Teacher>> {
    let query = query.clone();
    self.read(move |conn| query::teachers(conn, &query)).await
  }

  async fn delete_teacher(&self, id: Uuid) -> Result<()> {
    self
      .write(move |tx| query::delete_row(tx, "teachers", "teacher_id", "teacher", id))
      .await?;
    tracing::debug!(%id, "deleted teacher");
    Ok(())
  }

  // ── Schedules ─────────────────────────────────────────────────────────────

  async fn create_schedule(&self, input: NewSchedule) -> Result<Schedule> {
    let id = Uuid::new_v4();
    let result = self
      .write(move |tx| query::save_schedule(tx, id, input, false))
      .await;
    let schedule = trace_rejection("create_schedule", result)?;

    tracing::debug!(
      id = %schedule.schedule_id,
      date = %schedule.date,
      class_type = %schedule.class_type,
      "created schedule"
    );
    Ok(schedule)
  }

  async fn update_schedule(&self, id: Uuid, input: NewSchedule) -> Result<Schedule> {
    let result = self
      .write(move |tx| query::save_schedule(tx, id, input, true))
      .await;
    trace_rejection("update_schedule", result)
  }

  async fn get_schedule(&self, id: Uuid) -> Result<Option<Schedule>> {
    self.read(move |conn| query::schedule(conn, id)).await
  }

  async fn list_schedules(&self, query: &ScheduleQuery) -> Result<Vec<Schedule>> {
    let query = query.clone();
    self.read(move |conn| query::schedules(conn, &query)).await
  }

  async fn delete_schedule(&self, id: Uuid) -> Result<()> {
    self
      .write(move |tx| query::delete_row(tx, "schedules", "schedule_id", "schedule", id))
      .await?;
    tracing::debug!(%id, "deleted schedule");
    Ok(())
  }

  // ── Assignments ───────────────────────────────────────────────────────────

  async fn assign(&self, input: NewAssignment) -> Result<RoleAssignment> {
    let id = Uuid::new_v4();
    let policy = Arc::clone(&self.policy);
    let result = self
      .write(move |tx| query::save_assignment(tx, &policy, id, input, false))
      .await;
    let assignment = trace_rejection("assign", result)?;

    tracing::debug!(
      id = %assignment.assignment_id,
      schedule = %assignment.schedule_id,
      role = %assignment.role_id,
      "recorded assignment"
    );
    Ok(assignment)
  }

  async fn reassign(&self, id: Uuid, input: NewAssignment) -> Result<RoleAssignment> {
    let policy = Arc::clone(&self.policy);
    let result = self
      .write(move |tx| query::save_assignment(tx, &policy, id, input, true))
      .await;
    trace_rejection("reassign", result)
  }

  async fn get_assignment(&self, id: Uuid) -> Result<Option<AssignmentDetail>> {
    let mut found = self
      .read(move |conn| {
        query::details(conn, &DetailFilter {
          assignment_id: Some(id),
          ..Default::default()
        })
      })
      .await?;
    Ok(found.pop())
  }

  async fn list_assignments(
    &self,
    query: &AssignmentQuery,
  ) -> Result<Vec<AssignmentDetail>> {
    let filter = DetailFilter {
      assignment_id: None,
      schedule_id:   query.schedule_id,
      person_id:     query.person_id,
      department_id: query.department_id,
      role:          query.role.clone(),
      date:          query.date,
    };
    let mut details = self.read(move |conn| query::details(conn, &filter)).await?;

    if !query.class_types.is_empty() {
      details.retain(|d| query.class_types.contains(&d.schedule.class_type));
    }
    Ok(details)
  }

  async fn remove_assignment(&self, id: Uuid) -> Result<()> {
    self
      .write(move |tx| {
        query::delete_row(tx, "role_assignments", "assignment_id", "assignment", id)
      })
      .await?;
    tracing::debug!(%id, "removed assignment");
    Ok(())
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn department_report(
    &self,
    department_id: Uuid,
    layout:        &ReportLayout,
  ) -> Result<Option<Vec<ReportRow>>> {
    let layout = layout.clone();
    self
      .read(move |conn| {
        if query::department(conn, department_id)?.is_none() {
          return Ok(None);
        }
        let class_types = layout.class_types();
        let schedules = query::schedules(conn, &ScheduleQuery {
          department_id: Some(department_id),
          class_types:   class_types.clone(),
          ..Default::default()
        })?;
        let mut details = query::details(conn, &DetailFilter {
          department_id: Some(department_id),
          ..Default::default()
        })?;
        if !class_types.is_empty() {
          details.retain(|d| class_types.contains(&d.schedule.class_type));
        }
        let names = query::report_names(conn)?;
        Ok(Some(build_report(&layout, &schedules, &details, &names)))
      })
      .await
  }

  async fn class_report(
    &self,
    class_types: &[ClassType],
    layout:      &ReportLayout,
  ) -> Result<Vec<ReportRow>> {
    let class_types = class_types.to_vec();
    let layout = layout.clone();
    self
      .read(move |conn| {
        let schedules = query::schedules(conn, &ScheduleQuery {
          class_types: class_types.clone(),
          ..Default::default()
        })?;
        let mut details = query::details(conn, &DetailFilter::default())?;
        if !class_types.is_empty() {
          details.retain(|d| class_types.contains(&d.schedule.class_type));
        }
        let names = query::report_names(conn)?;
        Ok(build_class_report(&layout, &schedules, &details, &names))
      })
      .await
  }
}
