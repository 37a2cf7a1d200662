//! JSON REST API for rollbook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rollbook_core::store::RosterStore`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rollbook_api::api_router(store.clone()))
//! ```

pub mod assignments;
pub mod catalog;
pub mod departments;
pub mod error;
pub mod reports;
pub mod schedules;
pub mod teachers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use rollbook_core::store::RosterStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Departments
    .route(
      "/departments",
      get(departments::list::<S>).post(departments::create::<S>),
    )
    .route(
      "/departments/{id}",
      get(departments::get_one::<S>).delete(departments::delete_one::<S>),
    )
    .route("/departments/{id}/report", post(departments::report::<S>))
    // Catalogs
    .route(
      "/catalog/{kind}",
      get(catalog::list::<S>).post(catalog::create::<S>),
    )
    .route("/catalog/{kind}/{id}", delete(catalog::delete_one::<S>))
    // Teachers
    .route("/teachers", get(teachers::list::<S>).post(teachers::create::<S>))
    .route(
      "/teachers/{id}",
      get(teachers::get_one::<S>)
        .put(teachers::update::<S>)
        .delete(teachers::delete_one::<S>),
    )
    // Schedules
    .route(
      "/schedules",
      get(schedules::list::<S>).post(schedules::create::<S>),
    )
    .route(
      "/schedules/{id}",
      get(schedules::get_one::<S>)
        .put(schedules::update::<S>)
        .delete(schedules::delete_one::<S>),
    )
    // Assignments
    .route(
      "/assignments",
      get(assignments::list::<S>).post(assignments::create::<S>),
    )
    .route(
      "/assignments/{id}",
      get(assignments::get_one::<S>)
        .put(assignments::update::<S>)
        .delete(assignments::delete_one::<S>),
    )
    // Reports
    .route("/reports/classes", post(reports::classes::<S>))
    .with_state(store)
}

// ─── Router tests ────────────────────────────────────────────────────────────
