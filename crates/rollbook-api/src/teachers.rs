//! Handlers for `/teachers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/teachers` | Optional `?department_id=`, `?status=active\|inactive\|new` |
//! | `POST`   | `/teachers` | Body: [`NewTeacher`] (flat status form) |
//! | `GET`    | `/teachers/{id}` | 404 if not found |
//! | `PUT`    | `/teachers/{id}` | Overwrites; the status rule is re-checked |
//! | `DELETE` | `/teachers/{id}` | Assignments keep their slot, with no person |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rollbook_core::{
  store::{RosterStore, TeacherQuery},
  teacher::{NewTeacher, StatusLabel, Teacher},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, JsonBody};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub department_id: Option<Uuid>,
  pub status:        Option<StatusLabel>,
}

/// `GET /teachers[?department_id=<id>][&status=<label>]`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Teacher>>, ApiError> {
  let query = TeacherQuery {
    department_id: params.department_id,
    status:        params.status,
  };
  let teachers = store.list_teachers(&query).await.map_err(ApiError::store)?;
  Ok(Json(teachers))
}

/// `POST /teachers`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewTeacher>,
) -> Result<impl IntoResponse, ApiError> {
  let teacher = store.add_teacher(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(teacher)))
}

/// `GET /teachers/{id}`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, ApiError> {
  let teacher = store
    .get_teacher(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("teacher {id} not found")))?;
  Ok(Json(teacher))
}

/// `PUT /teachers/{id}`
pub async fn update<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<NewTeacher>,
) -> Result<Json<Teacher>, ApiError> {
  let teacher = store.update_teacher(id, body).await.map_err(ApiError::store)?;
  Ok(Json(teacher))
}

/// `DELETE /teachers/{id}`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_teacher(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
