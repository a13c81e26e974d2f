//! Handlers for `/visits/{kind}` endpoints, where `kind` is `country` or
//! `state`.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/visits/{kind}` | Past and upcoming visits, newest first |
//! | `POST`   | `/visits/{kind}` | Body: [`NewVisitBody`]; 201 or 400 with a reason |
//! | `DELETE` | `/visits/{kind}/{id}` | Always 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use travelog_core::{
  place::PlaceKind,
  report::VisitRow,
  service,
  store::TravelStore,
  visit::Visit,
};

use crate::{
  error::ApiError,
  snapshot::{self, Places},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct VisitsPage {
  pub past:   Vec<VisitRow>,
  pub future: Vec<VisitRow>,
}

/// `GET /visits/{kind}`
pub async fn list<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<PlaceKind>,
) -> Result<Json<VisitsPage>, ApiError> {
  let (past, future) = snapshot::visits(store.as_ref(), kind, snapshot::today()).await?;
  let places = Places::load(store.as_ref(), kind).await?;

  Ok(Json(VisitsPage {
    past:   places.chronological(&past)?,
    future: places.chronological(&future)?,
  }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /visits/{kind}`. Fields are raw strings, as a
/// form would submit them; validation happens in the service.
#[derive(Debug, Deserialize)]
pub struct NewVisitBody {
  pub place_id:   Option<String>,
  /// `YYYY-MM-DD`
  pub start_date: Option<String>,
  /// `YYYY-MM-DD`
  pub end_date:   Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Created {
  pub message: &'static str,
  pub visit:   Visit,
}

/// `POST /visits/{kind}`: 201 with the stored visit.
pub async fn create<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path(kind): Path<PlaceKind>,
  Json(body): Json<NewVisitBody>,
) -> Result<impl IntoResponse, ApiError> {
  let visit = service::add_visit(
    store.as_ref(),
    kind,
    body.place_id.as_deref(),
    body.start_date.as_deref(),
    body.end_date.as_deref(),
  )
  .await?;

  Ok((
    StatusCode::CREATED,
    Json(Created { message: "Visit added successfully!", visit }),
  ))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /visits/{kind}/{id}`. Failures are logged, never reported.
pub async fn remove<S: TravelStore>(
  State(store): State<Arc<S>>,
  Path((kind, id)): Path<(PlaceKind, String)>,
) -> StatusCode {
  service::delete_visit(store.as_ref(), kind, &id).await;
  StatusCode::NO_CONTENT
}
