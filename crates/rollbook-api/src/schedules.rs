//! Handlers for `/schedules` endpoints.
//!
//! Creates and edits pass through the validation engine; a refused write is
//! answered with `409` and the rejection kind.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use rollbook_core::{
  parse_label,
  schedule::{ClassType, NewSchedule, Schedule},
  store::{RosterStore, ScheduleQuery},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, JsonBody};

/// Split a comma-separated `class_type` parameter. Original labels such as
/// `崇拜` are accepted alongside the English names.
pub(crate) fn class_types(param: Option<&str>) -> Result<Vec<ClassType>, ApiError> {
  let Some(param) = param else {
    return Ok(Vec::new());
  };
  param
    .split(',')
    .filter(|s| !s.trim().is_empty())
    .map(|s| parse_label("class type", s).map_err(ApiError::from))
    .collect()
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub department_id: Option<Uuid>,
  /// Comma-separated, e.g. `worship,hymn`.
  pub class_type:    Option<String>,
  pub from:          Option<NaiveDate>,
  pub to:            Option<NaiveDate>,
}

/// `GET /schedules[?department_id=...][&class_type=...][&from=...][&to=...]`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
  let query = ScheduleQuery {
    department_id: params.department_id,
    class_types:   class_types(params.class_type.as_deref())?,
    from:          params.from,
    to:            params.to,
  };
  let schedules = store.list_schedules(&query).await.map_err(ApiError::store)?;
  Ok(Json(schedules))
}

/// `POST /schedules`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewSchedule>,
) -> Result<impl IntoResponse, ApiError> {
  let schedule = store.create_schedule(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(schedule)))
}

/// `GET /schedules/{id}`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Schedule>, ApiError> {
  let schedule = store
    .get_schedule(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("schedule {id} not found")))?;
  Ok(Json(schedule))
}

/// `PUT /schedules/{id}`
pub async fn update<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<NewSchedule>,
) -> Result<Json<Schedule>, ApiError> {
  let schedule = store
    .update_schedule(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(schedule))
}

/// `DELETE /schedules/{id}`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_schedule(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
