//! The `RosterStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `rollbook-store-sqlite`).
//! Higher layers (`rollbook-api`, `rollbook-server`) depend on this
//! abstraction, not on any concrete backend.
//!
//! Every write of a schedule or an assignment is gated by the validation
//! engine in [`crate::validate`]; implementations must run the gate and the
//! write atomically so a concurrent writer cannot slip in between.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Rejection,
  assignment::{AssignmentDetail, NewAssignment, RoleAssignment},
  catalog::{CatalogEntry, CatalogKind, Department, NewCatalogEntry, NewDepartment},
  report::{ReportLayout, ReportRow},
  schedule::{ClassType, NewSchedule, Schedule},
  teacher::{NewTeacher, StatusLabel, Teacher},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`RosterStore::list_teachers`].
#[derive(Debug, Clone, Default)]
pub struct TeacherQuery {
  pub department_id: Option<Uuid>,
  pub status:        Option<StatusLabel>,
}

/// Parameters for [`RosterStore::list_schedules`].
#[derive(Debug, Clone, Default)]
pub struct ScheduleQuery {
  pub department_id: Option<Uuid>,
  /// Empty matches every class type.
  pub class_types:   Vec<ClassType>,
  /// Inclusive lower bound.
  pub from:          Option<NaiveDate>,
  /// Inclusive upper bound.
  pub to:            Option<NaiveDate>,
}

/// Parameters for [`RosterStore::list_assignments`].
#[derive(Debug, Clone, Default)]
pub struct AssignmentQuery {
  pub schedule_id:   Option<Uuid>,
  pub person_id:     Option<Uuid>,
  pub department_id: Option<Uuid>,
  /// Exact class role name.
  pub role:          Option<String>,
  pub class_types:   Vec<ClassType>,
  pub date:          Option<NaiveDate>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Backend-independent classification of a store error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
  /// Refused by the validation engine or a storage constraint.
  Rejected(Rejection),
  /// The record, or one it references, does not exist.
  NotFound,
  /// A uniquely named record already exists.
  Conflict,
  /// The input could not be interpreted.
  Invalid,
  Internal,
}

/// Error type of a [`RosterStore`] backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn failure(&self) -> Failure;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a rollbook store backend.
///
/// Results are ordered by name for named records, and by date then start time
/// for schedules and assignments.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: StoreError;

  // ── Departments ───────────────────────────────────────────────────────

  fn add_department(
    &self,
    input: NewDepartment,
  ) -> impl Future<Output = Result<Department, Self::Error>> + Send + '_;

  fn get_department(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Department>, Self::Error>> + Send + '_;

  fn find_department<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Department>, Self::Error>> + Send + 'a;

  fn list_departments(
    &self,
  ) -> impl Future<Output = Result<Vec<Department>, Self::Error>> + Send + '_;

  /// Delete a department together with its schedules. Teachers keep their
  /// record but lose the reference; active ones are demoted to new.
  fn delete_department(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Catalogs ──────────────────────────────────────────────────────────

  fn add_catalog_entry(
    &self,
    kind: CatalogKind,
    input: NewCatalogEntry,
  ) -> impl Future<Output = Result<CatalogEntry, Self::Error>> + Send + '_;

  fn find_catalog_entry<'a>(
    &'a self,
    kind: CatalogKind,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<CatalogEntry>, Self::Error>> + Send + 'a;

  fn list_catalog(
    &self,
    kind: CatalogKind,
  ) -> impl Future<Output = Result<Vec<CatalogEntry>, Self::Error>> + Send + '_;

  /// Delete a catalog entry. Deleting a class role also deletes the
  /// assignments that use it; positions and hymn types are unlinked.
  fn delete_catalog_entry(
    &self,
    kind: CatalogKind,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Teachers ──────────────────────────────────────────────────────────

  /// Create a teacher. Fails if the status rule is violated.
  fn add_teacher(
    &self,
    input: NewTeacher,
  ) -> impl Future<Output = Result<Teacher, Self::Error>> + Send + '_;

  /// Overwrite a teacher. Status changes are direct; only the field rule
  /// applies.
  fn update_teacher(
    &self,
    id: Uuid,
    input: NewTeacher,
  ) -> impl Future<Output = Result<Teacher, Self::Error>> + Send + '_;

  fn get_teacher(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Teacher>, Self::Error>> + Send + '_;

  fn list_teachers<'a>(
    &'a self,
    query: &'a TeacherQuery,
  ) -> impl Future<Output = Result<Vec<Teacher>, Self::Error>> + Send + 'a;

  /// Delete a teacher. Their assignments stay, with no person.
  fn delete_teacher(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Schedules ─────────────────────────────────────────────────────────

  /// Validate and create a schedule.
  fn create_schedule(
    &self,
    input: NewSchedule,
  ) -> impl Future<Output = Result<Schedule, Self::Error>> + Send + '_;

  /// Validate and overwrite a schedule.
  fn update_schedule(
    &self,
    id: Uuid,
    input: NewSchedule,
  ) -> impl Future<Output = Result<Schedule, Self::Error>> + Send + '_;

  fn get_schedule(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Schedule>, Self::Error>> + Send + '_;

  fn list_schedules<'a>(
    &'a self,
    query: &'a ScheduleQuery,
  ) -> impl Future<Output = Result<Vec<Schedule>, Self::Error>> + Send + 'a;

  /// Delete a schedule and, with it, all of its assignments.
  fn delete_schedule(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Assignments ───────────────────────────────────────────────────────

  /// Validate and record a new role assignment.
  fn assign(
    &self,
    input: NewAssignment,
  ) -> impl Future<Output = Result<RoleAssignment, Self::Error>> + Send + '_;

  /// Validate and overwrite an existing assignment.
  fn reassign(
    &self,
    id: Uuid,
    input: NewAssignment,
  ) -> impl Future<Output = Result<RoleAssignment, Self::Error>> + Send + '_;

  fn get_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<AssignmentDetail>, Self::Error>> + Send + '_;

  fn list_assignments<'a>(
    &'a self,
    query: &'a AssignmentQuery,
  ) -> impl Future<Output = Result<Vec<AssignmentDetail>, Self::Error>> + Send + 'a;

  fn remove_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Build the dated report for a department. Returns `None` if the
  /// department does not exist.
  fn department_report<'a>(
    &'a self,
    department_id: Uuid,
    layout: &'a ReportLayout,
  ) -> impl Future<Output = Result<Option<Vec<ReportRow>>, Self::Error>> + Send + 'a;

  /// Build the report across every department for sessions of
  /// `class_types` (empty means all), one row per date and department.
  fn class_report<'a>(
    &'a self,
    class_types: &'a [ClassType],
    layout: &'a ReportLayout,
  ) -> impl Future<Output = Result<Vec<ReportRow>, Self::Error>> + Send + 'a;
}
