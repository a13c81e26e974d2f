//! Error types for `travelog-core`.

use thiserror::Error;

use crate::place::{Id, PlaceKind};

#[derive(Debug, Error)]
pub enum Error {
  /// A visit references a place that is not in the snapshot handed to a
  /// report.
  #[error("{kind} {id} referenced by a visit does not exist")]
  UnknownPlace { kind: PlaceKind, id: Id },

  #[error("invalid stored date component: {0}")]
  InvalidDatePart(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
