//! Error type for `travelog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] travelog_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A place was added under a parent that does not exist.
  #[error("{kind} not found: {id}")]
  ParentNotFound { kind: &'static str, id: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
