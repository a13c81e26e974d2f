//! Visit records. A visit is never edited; it is added or deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{date::DateRange, place::Id};

/// A stored visit to a country or a state. The collection it came from is
/// named by [`PlaceKind`](crate::place::PlaceKind) at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
  pub id:       Id,
  pub place_id: Id,
  pub range:    DateRange,
}

impl Visit {
  pub fn is_in_past(&self, today: NaiveDate) -> bool {
    self.range.is_in_past(today)
  }
}

/// Input to [`crate::store::TravelStore::record_visit`]. The id is assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
  pub place_id: Id,
  pub range:    DateRange,
}
