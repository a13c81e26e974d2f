//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports/{kind}/most-visits` | Places ranked by number of past visits |
//! | `GET`  | `/reports/{kind}/most-days` | Places ranked by days spent |
//! | `GET`  | `/reports/{kind}/years` | One summary per year, newest first |
//! | `GET`  | `/reports/{kind}/map` | Visited and upcoming places |
//! | `GET`  | `/reports/continents` | Country coverage per continent |
//! | `GET`  | `/reports/states` | State coverage per country |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Datelike as _;
use travelog_core::{
  place::PlaceKind,
  report::{self, Coverage, LeaderboardRow, MapView, Metric, YearSummary},
  store::TravelStore,
};

use crate::{
  error::ApiError,
  snapshot::{self, Places},
};

async fn ranked<S: TravelStore>(
  store: &S,
  kind: PlaceKind,
  metric: Metric,
) -> Result<Vec<LeaderboardRow>, ApiError> {
  let (past, _) = snapshot::visits(store, kind, snapshot::today()).await?;
  let places = Places::load(store, kind).await?;
  Ok(places.leaderboard(&past, metric)?)
}

/// `GET /reports/{kind}/most-visits`
pub async fn most_visits<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<PlaceKind>,
) -> Result<Json<Vec<LeaderboardRow>>, ApiError> {
  Ok(Json(ranked(store.as_ref(), kind, Metric::VisitCount).await?))
}

/// `GET /reports/{kind}/most-days`
pub async fn most_days<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<PlaceKind>,
) -> Result<Json<Vec<LeaderboardRow>>, ApiError> {
  Ok(Json(ranked(store.as_ref(), kind, Metric::TotalDays).await?))
}

/// `GET /reports/{kind}/years`
pub async fn years<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<PlaceKind>,
) -> Result<Json<Vec<YearSummary>>, ApiError> {
  let today = snapshot::today();
  let (past, _) = snapshot::visits(store.as_ref(), kind, today).await?;
  Ok(Json(report::yearly_stats(&past, today.year())))
}

/// `GET /reports/{kind}/map`
pub async fn map<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<PlaceKind>,
) -> Result<Json<MapView>, ApiError> {
  let (past, future) = snapshot::visits(store.as_ref(), kind, snapshot::today()).await?;
  let places = Places::load(store.as_ref(), kind).await?;
  Ok(Json(places.map_view(&past, &future)?))
}

/// `GET /reports/continents`
pub async fn continents<S: TravelStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Coverage>>, ApiError> {
  let (past, _) =
    snapshot::visits(store.as_ref(), PlaceKind::Country, snapshot::today()).await?;
  let continents = store.list_continents().await.map_err(ApiError::store)?;
  let countries = store.list_countries().await.map_err(ApiError::store)?;
  Ok(Json(report::continent_coverage(&continents, &countries, &past)))
}

/// `GET /reports/states`
pub async fn states<S: TravelStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Coverage>>, ApiError> {
  let (past, _) =
    snapshot::visits(store.as_ref(), PlaceKind::State, snapshot::today()).await?;
  let countries = store.list_countries().await.map_err(ApiError::store)?;
  let states = store.list_states().await.map_err(ApiError::store)?;
  Ok(Json(report::state_coverage(&countries, &states, &past)?))
}
