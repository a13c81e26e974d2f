//! Loading the records a report runs over.
//!
//! Reports are generic over the place type; the request only names a
//! [`PlaceKind`]. [`Places`] bridges the two by holding whichever table the
//! kind selects and forwarding to the matching report instantiation.

use chrono::{Local, NaiveDate};
use travelog_core::{
  Result,
  place::{Country, PlaceKind, State},
  report::{self, LeaderboardRow, MapView, Metric, VisitRow},
  store::TravelStore,
  visit::Visit,
};

use crate::error::ApiError;

/// The civil date reports treat as "today".
pub fn today() -> NaiveDate { Local::now().date_naive() }

/// Every visit of `kind`, split into past and not-yet-past.
pub async fn visits<S: TravelStore>(
  store: &S,
  kind: PlaceKind,
  today: NaiveDate,
) -> Result<(Vec<Visit>, Vec<Visit>), ApiError> {
  let visits = store.list_visits(kind).await.map_err(ApiError::store)?;
  Ok(report::split_by_tense(visits, today))
}

pub enum Places {
  Countries(Vec<Country>),
  States(Vec<State>),
}

impl Places {
  pub async fn load<S: TravelStore>(
    store: &S,
    kind: PlaceKind,
  ) -> Result<Self, ApiError> {
    Ok(match kind {
      PlaceKind::Country => {
        Self::Countries(store.list_countries().await.map_err(ApiError::store)?)
      }
      PlaceKind::State => {
        Self::States(store.list_states().await.map_err(ApiError::store)?)
      }
    })
  }

  pub fn chronological(&self, visits: &[Visit]) -> Result<Vec<VisitRow>> {
    match self {
      Self::Countries(places) => report::chronological(visits, places),
      Self::States(places) => report::chronological(visits, places),
    }
  }

  pub fn leaderboard(
    &self,
    past: &[Visit],
    metric: Metric,
  ) -> Result<Vec<LeaderboardRow>> {
    match self {
      Self::Countries(places) => report::leaderboard(past, places, metric),
      Self::States(places) => report::leaderboard(past, places, metric),
    }
  }

  pub fn map_view(&self, past: &[Visit], future: &[Visit]) -> Result<MapView> {
    match self {
      Self::Countries(places) => report::map_view(past, future, places),
      Self::States(places) => report::map_view(past, future, places),
    }
  }
}
