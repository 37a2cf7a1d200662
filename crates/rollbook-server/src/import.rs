//! Teacher import from the program's roster CSV.
//!
//! Headers may be the original ones (`擔任狀況`, `主要所屬`, `職責`, `姓名`,
//! `性別`, `所屬區`) or their English names. Departments and positions are
//! matched by name and created on first sight. A row that cannot be read or
//! that the store refuses is logged and skipped.

use std::io;

use rollbook_core::{
  catalog::{CatalogKind, NewCatalogEntry, NewDepartment},
  parse_label,
  store::RosterStore,
  teacher::{Gender, NewTeacher, StatusLabel, TeacherStatus},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct RosterRow {
  #[serde(alias = "擔任狀況")]
  status:     String,
  #[serde(alias = "主要所屬", default)]
  department: Option<String>,
  #[serde(alias = "職責", default)]
  position:   Option<String>,
  #[serde(alias = "姓名")]
  name:       String,
  #[serde(alias = "性別")]
  gender:     String,
  #[serde(alias = "所屬區", default)]
  region:     Option<String>,
}

/// Outcome of an import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
  pub imported: usize,
  pub skipped:  usize,
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

fn store_error<E: std::error::Error + Send + Sync + 'static>(err: E) -> Error {
  Error::Store(Box::new(err))
}

async fn ensure_department<S: RosterStore>(store: &S, name: &str) -> Result<Uuid> {
  if let Some(found) = store.find_department(name).await.map_err(store_error)? {
    return Ok(found.department_id);
  }
  let created = store
    .add_department(NewDepartment::named(name))
    .await
    .map_err(store_error)?;
  tracing::info!(name, "created department");
  Ok(created.department_id)
}

async fn ensure_position<S: RosterStore>(store: &S, name: &str) -> Result<Uuid> {
  if let Some(found) = store
    .find_catalog_entry(CatalogKind::Position, name)
    .await
    .map_err(store_error)?
  {
    return Ok(found.entry_id);
  }
  let created = store
    .add_catalog_entry(CatalogKind::Position, NewCatalogEntry::named(name))
    .await
    .map_err(store_error)?;
  tracing::info!(name, "created position");
  Ok(created.entry_id)
}

/// Turn one CSV row into a teacher input, creating the department and
/// position it names if needed. `Ok(None)` means the row was refused before
/// anything was written; the reason has already been logged.
async fn resolve_row<S: RosterStore>(
  store: &S,
  line: u64,
  row: RosterRow,
) -> Result<Option<NewTeacher>> {
  let labels = parse_label::<StatusLabel>("teacher status", &row.status)
    .and_then(|status| Ok((status, parse_label::<Gender>("gender", &row.gender)?)));
  let (status, gender) = match labels {
    Ok(labels) => labels,
    Err(err) => {
      tracing::warn!(line, name = %row.name, "skipping row: {err}");
      return Ok(None);
    }
  };

  // Inactive teachers carry no department or position.
  let (department, position) = match status {
    StatusLabel::Inactive => (None, None),
    _ => (non_blank(row.department), non_blank(row.position)),
  };
  if let Err(rejection) = TeacherStatus::from_parts(
    status,
    department.is_some().then(Uuid::nil),
    position.is_some().then(Uuid::nil),
  ) {
    tracing::warn!(line, name = %row.name, "skipping row: {rejection}");
    return Ok(None);
  }
  let department_id = match department {
    Some(name) => Some(ensure_department(store, &name).await?),
    None => None,
  };
  let position_id = match position {
    Some(name) => Some(ensure_position(store, &name).await?),
    None => None,
  };

  Ok(Some(NewTeacher {
    name: row.name.trim().to_owned(),
    status,
    department_id,
    position_id,
    gender,
    region: non_blank(row.region),
  }))
}

/// Import every row of `reader` into `store`.
///
/// Errors reading the CSV as a whole, or store failures other than a refused
/// teacher, abort the run.
pub async fn import_teachers<S, R>(store: &S, reader: R) -> Result<ImportSummary>
where
  S: RosterStore,
  R: io::Read,
{
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .trim(csv::Trim::All)
    .from_reader(reader);
  let mut summary = ImportSummary::default();

  for (i, row) in reader.deserialize::<RosterRow>().enumerate() {
    let line = i as u64 + 2;
    let row = match row {
      Ok(row) => row,
      Err(err) => {
        tracing::warn!(line, "skipping unreadable row: {err}");
        summary.skipped += 1;
        continue;
      }
    };

    let Some(input) = resolve_row(store, line, row).await? else {
      summary.skipped += 1;
      continue;
    };

    let name = input.name.clone();
    match store.add_teacher(input).await {
      Ok(teacher) => {
        tracing::debug!(line, id = %teacher.teacher_id, name, "imported teacher");
        summary.imported += 1;
      }
      Err(err) => {
        tracing::warn!(line, name, "skipping row: {err}");
        summary.skipped += 1;
      }
    }
  }

  tracing::info!(
    imported = summary.imported,
    skipped = summary.skipped,
    "teacher import finished"
  );
  Ok(summary)
}
