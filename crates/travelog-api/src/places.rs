//! Handlers for the place tables.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/continents` | Ordered by name |
//! | `GET`  | `/countries` | Ordered by name; the add-visit picker |
//! | `GET`  | `/states` | Each state with its country name |
//! | `GET`  | `/places/{kind}/{id}/visits` | One place's visits, newest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use travelog_core::{
  place::{Continent, Country, Id, PlaceKind},
  report::{self, StateOption, VisitRow},
  store::TravelStore,
};

use crate::{error::ApiError, snapshot::Places};

/// `GET /continents`
pub async fn continents<S: TravelStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Continent>>, ApiError> {
  let continents = store.list_continents().await.map_err(ApiError::store)?;
  Ok(Json(continents))
}

/// `GET /countries`
pub async fn countries<S: TravelStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Country>>, ApiError> {
  let countries = store.list_countries().await.map_err(ApiError::store)?;
  Ok(Json(countries))
}

/// `GET /states`
pub async fn states<S: TravelStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<StateOption>>, ApiError> {
  let states = store.list_states().await.map_err(ApiError::store)?;
  let countries = store.list_countries().await.map_err(ApiError::store)?;
  Ok(Json(report::state_options(&states, &countries)?))
}

/// `GET /places/{kind}/{id}/visits`. 404 if the place does not exist.
pub async fn visits<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path((kind, id)): Path<(PlaceKind, Id)>,
) -> Result<Json<Vec<VisitRow>>, ApiError> {
  let exists = match kind {
    PlaceKind::Country => store.get_country(id).await.map_err(ApiError::store)?.is_some(),
    PlaceKind::State => store.get_state(id).await.map_err(ApiError::store)?.is_some(),
  };
  if !exists {
    return Err(ApiError::NotFound(format!("{kind} {id} not found")));
  }

  let visits = store.visits_to(kind, id).await.map_err(ApiError::store)?;
  let places = Places::load(store.as_ref(), kind).await?;
  Ok(Json(places.chronological(&visits)?))
}
