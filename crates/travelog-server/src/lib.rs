//! Travelog server: configuration, application router and reference-data
//! seeding. The `travelog` binary wires these together.

pub mod seed;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use travelog_core::store::TravelStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TRAVELOG_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Places document loaded into an empty store at startup.
  #[serde(default)]
  pub seed_path:  Option<PathBuf>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: TravelStore + 'static,
{
  Router::new()
    .nest("/api", travelog_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
