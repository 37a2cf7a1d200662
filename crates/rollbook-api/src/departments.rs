//! Handlers for `/departments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/departments` | Optional `?name=` exact match |
//! | `POST`   | `/departments` | Body: `{"name":"...","description":"..."}` |
//! | `GET`    | `/departments/{id}` | 404 if not found |
//! | `DELETE` | `/departments/{id}` | Also deletes its schedules |
//! | `POST`   | `/departments/{id}/report` | Body: [`ReportLayout`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rollbook_core::{
  catalog::{Department, NewDepartment},
  report::{ReportLayout, ReportRow},
  store::RosterStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, JsonBody};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub name: Option<String>,
}

/// `GET /departments[?name=<name>]`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Department>>, ApiError> {
  let departments = match params.name {
    Some(name) => store
      .find_department(&name)
      .await
      .map_err(ApiError::store)?
      .into_iter()
      .collect(),
    None => store.list_departments().await.map_err(ApiError::store)?,
  };
  Ok(Json(departments))
}

/// `POST /departments`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewDepartment>,
) -> Result<impl IntoResponse, ApiError> {
  let department = store.add_department(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(department)))
}

/// `GET /departments/{id}`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Department>, ApiError> {
  let department = store
    .get_department(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("department {id} not found")))?;
  Ok(Json(department))
}

/// `DELETE /departments/{id}`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_department(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /departments/{id}/report`
pub async fn report<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  JsonBody(layout): JsonBody<ReportLayout>,
) -> Result<Json<Vec<ReportRow>>, ApiError> {
  let rows = store
    .department_report(id, &layout)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("department {id} not found")))?;
  Ok(Json(rows))
}
