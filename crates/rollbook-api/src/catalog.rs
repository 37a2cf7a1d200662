//! Handlers for the named catalogs: positions, class roles and hymn types.
//!
//! `{kind}` is one of `position`, `class-role` or `hymn-type`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rollbook_core::{
  catalog::{CatalogEntry, CatalogKind, NewCatalogEntry},
  store::RosterStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, JsonBody};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub name: Option<String>,
}

/// `GET /catalog/{kind}[?name=<name>]`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<CatalogKind>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
  let entries = match params.name {
    Some(name) => store
      .find_catalog_entry(kind, &name)
      .await
      .map_err(ApiError::store)?
      .into_iter()
      .collect(),
    None => store.list_catalog(kind).await.map_err(ApiError::store)?,
  };
  Ok(Json(entries))
}

/// `POST /catalog/{kind}`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<CatalogKind>,
  JsonBody(body): JsonBody<NewCatalogEntry>,
) -> Result<impl IntoResponse, ApiError> {
  let entry = store
    .add_catalog_entry(kind, body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(entry)))
}

/// `DELETE /catalog/{kind}/{id}`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Path((kind, id)): Path<(CatalogKind, Uuid)>,
) -> Result<StatusCode, ApiError> {
  store
    .delete_catalog_entry(kind, id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
