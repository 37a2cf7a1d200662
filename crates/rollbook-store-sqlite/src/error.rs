//! Error type for `rollbook-store-sqlite`.

use rollbook_core::{
  Rejection,
  store::{Failure, StoreError},
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rollbook_core::Error),

  /// The write was refused by the validation engine or a storage
  /// constraint.
  #[error(transparent)]
  Rejected(#[from] Rejection),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: Uuid },

  #[error("a {entity} named {name:?} already exists")]
  NameTaken { entity: &'static str, name: String },
}

impl Error {
  /// Turn a UNIQUE constraint violation into `conflict`; pass anything else
  /// through.
  pub(crate) fn on_unique(
    err: rusqlite::Error,
    conflict: impl FnOnce() -> Error,
  ) -> Error {
    match &err {
      rusqlite::Error::SqliteFailure(e, _)
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
      {
        conflict()
      }
      _ => Error::Sqlite(err),
    }
  }

  pub fn rejection(&self) -> Option<&Rejection> {
    match self {
      Error::Rejected(r) | Error::Core(rollbook_core::Error::Rejected(r)) => {
        Some(r)
      }
      _ => None,
    }
  }
}

impl StoreError for Error {
  fn failure(&self) -> Failure {
    if let Some(rejection) = self.rejection() {
      return Failure::Rejected(rejection.clone());
    }
    match self {
      Error::NotFound { .. } => Failure::NotFound,
      Error::NameTaken { .. } => Failure::Conflict,
      Error::Core(rollbook_core::Error::UnknownLabel { .. }) => Failure::Invalid,
      _ => Failure::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
