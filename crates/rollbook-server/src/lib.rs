//! HTTP server and roster import for rollbook.
//!
//! Mounts the JSON API from [`rollbook_api`] under `/api`, wrapped in a
//! request trace layer.

pub mod error;
pub mod import;

pub use error::{Error, Result};

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use rollbook_core::{store::RosterStore, validate::AssignmentPolicy};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `rollbook.toml` and
/// `ROLLBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Name of the class role that may be filled more than once per session.
  pub multi_fill_role: String,
}

impl ServerConfig {
  /// Layer `path` (optional) and the environment over the built-in defaults.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("store_path", "rollbook.db")?
      .set_default("multi_fill_role", AssignmentPolicy::DEFAULT_MULTI_FILL_ROLE)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROLLBOOK").try_parsing(true))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn policy(&self) -> AssignmentPolicy {
    AssignmentPolicy::new(self.multi_fill_role.clone())
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server [`Router`]: the API under `/api`, traced.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RosterStore + 'static,
{
  Router::new()
    .nest("/api", rollbook_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
