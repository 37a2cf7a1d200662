//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/reports/classes` | Every department; `?class_type=hymn`. Body: [`ReportLayout`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use rollbook_core::{
  report::{ReportLayout, ReportRow},
  store::RosterStore,
};
use serde::Deserialize;

use crate::{
  error::{ApiError, JsonBody},
  schedules::class_types,
};

#[derive(Debug, Deserialize)]
pub struct ClassParams {
  /// Comma-separated; omitted means every class type.
  pub class_type: Option<String>,
}

/// `POST /reports/classes[?class_type=..]`
pub async fn classes<S: RosterStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ClassParams>,
  JsonBody(layout): JsonBody<ReportLayout>,
) -> Result<Json<Vec<ReportRow>>, ApiError> {
  let class_types = class_types(params.class_type.as_deref())?;
  let rows = store
    .class_report(&class_types, &layout)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}
