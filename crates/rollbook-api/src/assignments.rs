//! Handlers for `/assignments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assignments` | Filters: `schedule_id`, `person_id`, `department_id`, `role`, `class_type`, `date` |
//! | `POST`   | `/assignments` | Body: `{"schedule_id":..,"role_id":..,"person_id":..}` |
//! | `GET`    | `/assignments/{id}` | Joined detail view |
//! | `PUT`    | `/assignments/{id}` | Re-validated, ignoring the row itself |
//! | `DELETE` | `/assignments/{id}` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use rollbook_core::{
  assignment::{AssignmentDetail, NewAssignment, RoleAssignment},
  store::{AssignmentQuery, RosterStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::{ApiError, JsonBody},
  schedules::class_types,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub schedule_id:   Option<Uuid>,
  pub person_id:     Option<Uuid>,
  pub department_id: Option<Uuid>,
  /// Exact class role name.
  pub role:          Option<String>,
  /// Comma-separated class types.
  pub class_type:    Option<String>,
  pub date:          Option<NaiveDate>,
}

/// `GET /assignments[?...]`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<AssignmentDetail>>, ApiError> {
  let query = AssignmentQuery {
    schedule_id:   params.schedule_id,
    person_id:     params.person_id,
    department_id: params.department_id,
    role:          params.role,
    class_types:   class_types(params.class_type.as_deref())?,
    date:          params.date,
  };
  let details = store
    .list_assignments(&query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(details))
}

/// `POST /assignments`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewAssignment>,
) -> Result<impl IntoResponse, ApiError> {
  let assignment = store.assign(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(assignment)))
}

/// `GET /assignments/{id}`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<AssignmentDetail>, ApiError> {
  let detail = store
    .get_assignment(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("assignment {id} not found")))?;
  Ok(Json(detail))
}

/// `PUT /assignments/{id}`
pub async fn update<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<NewAssignment>,
) -> Result<Json<RoleAssignment>, ApiError> {
  let assignment = store.reassign(id, body).await.map_err(ApiError::store)?;
  Ok(Json(assignment))
}

/// `DELETE /assignments/{id}`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.remove_assignment(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
