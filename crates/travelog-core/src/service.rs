//! The two write paths: adding a visit from raw form input, and deleting one.
//!
//! Both work on either visit collection, selected by [`PlaceKind`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
  date::DateRange,
  place::{Id, PlaceKind},
  store::TravelStore,
  visit::{NewVisit, Visit},
};

/// Why a visit was not added. The message is meant to be shown to the user.
#[derive(Debug, Error)]
pub enum AddVisitError {
  #[error("input data missing")]
  MissingInput,

  /// The id is not a number, or no place of that kind has it.
  #[error("no {kind} with id {raw}")]
  InvalidPlaceId { kind: PlaceKind, raw: String },

  #[error("invalid date {input:?}: expected YYYY-MM-DD")]
  InvalidDate { input: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn store_error<E>(e: E) -> AddVisitError
where
  E: std::error::Error + Send + Sync + 'static,
{
  AddVisitError::Store(Box::new(e))
}

/// Validate raw input and record a visit to the place `place_id` of `kind`.
///
/// Dates must be `YYYY-MM-DD`; the stored range is always fully known.
pub async fn add_visit<S: TravelStore>(
  store: &S,
  kind: PlaceKind,
  place_id: Option<&str>,
  start_date: Option<&str>,
  end_date: Option<&str>,
) -> Result<Visit, AddVisitError> {
  let (Some(place_id), Some(start_date), Some(end_date)) =
    (place_id, start_date, end_date)
  else {
    return Err(AddVisitError::MissingInput);
  };

  let invalid_id =
    || AddVisitError::InvalidPlaceId { kind, raw: place_id.to_owned() };
  let id: Id = place_id.parse().map_err(|_| invalid_id())?;
  if !place_exists(store, kind, id).await.map_err(store_error)? {
    return Err(invalid_id());
  }

  let range = DateRange::from_dates(parse_date(start_date)?, parse_date(end_date)?);
  let visit = store
    .record_visit(kind, NewVisit { place_id: id, range })
    .await
    .map_err(store_error)?;

  tracing::info!(%kind, visit_id = visit.id, place_id = id, "visit added");
  Ok(visit)
}

async fn place_exists<S: TravelStore>(
  store: &S,
  kind: PlaceKind,
  id: Id,
) -> Result<bool, S::Error> {
  Ok(match kind {
    PlaceKind::Country => store.get_country(id).await?.is_some(),
    PlaceKind::State => store.get_state(id).await?.is_some(),
  })
}

/// Parse a strict `YYYY-MM-DD` date. chrono alone accepts unpadded fields
/// and a leading sign or whitespace, so the shape is checked first.
fn parse_date(input: &str) -> Result<NaiveDate, AddVisitError> {
  let well_formed = input.len() == 10
    && input.bytes().enumerate().all(|(i, b)| match i {
      4 | 7 => b == b'-',
      _ => b.is_ascii_digit(),
    });
  well_formed
    .then(|| NaiveDate::parse_from_str(input, "%Y-%m-%d").ok())
    .flatten()
    .ok_or_else(|| AddVisitError::InvalidDate { input: input.to_owned() })
}

/// Delete the visit with id `id` from the `kind` collection.
///
/// Never fails: a malformed id, a missing visit or a store error is logged
/// and otherwise ignored.
pub async fn delete_visit<S: TravelStore>(store: &S, kind: PlaceKind, id: &str) {
  let Ok(visit_id) = id.parse::<Id>() else {
    tracing::info!(%kind, id, "couldn't delete visit: id is not a number");
    return;
  };

  match store.delete_visit(kind, visit_id).await {
    Ok(true) => tracing::info!(%kind, visit_id, "visit deleted"),
    Ok(false) => {
      tracing::info!(%kind, visit_id, "couldn't delete visit: not found")
    }
    Err(e) => {
      tracing::warn!(%kind, visit_id, error = %e, "couldn't delete visit")
    }
  }
}
