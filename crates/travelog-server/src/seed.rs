//! Loading the continent / country / state hierarchy into a fresh store.
//!
//! The document is JSON:
//!
//! ```json
//! { "continents": [
//!     { "name": "Europe", "countries": [
//!         { "name": "France" },
//!         { "name": "Spain", "states": ["Andalusia", "Catalonia"] }
//!     ] }
//! ] }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use travelog_store_sqlite::{NewContinent, NewCountry, SqliteStore};

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("failed to read {path:?}: {source}")]
  Read {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("malformed places document: {0}")]
  Parse(#[from] serde_json::Error),

  #[error(transparent)]
  Store(#[from] travelog_store_sqlite::Error),
}

pub type Result<T, E = SeedError> = std::result::Result<T, E>;

#[derive(Debug, Deserialize)]
pub struct Seed {
  pub continents: Vec<SeedContinent>,
}

#[derive(Debug, Deserialize)]
pub struct SeedContinent {
  pub name:      String,
  #[serde(default)]
  pub countries: Vec<SeedCountry>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCountry {
  pub name:   String,
  #[serde(default)]
  pub states: Vec<String>,
}

impl Seed {
  pub fn parse(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }

  fn into_places(self) -> Vec<NewContinent> {
    self
      .continents
      .into_iter()
      .map(|continent| NewContinent {
        name:      continent.name,
        countries: continent
          .countries
          .into_iter()
          .map(|country| NewCountry { name: country.name, states: country.states })
          .collect(),
      })
      .collect()
  }
}

/// Read the document at `path` and apply it. Returns whether anything was
/// inserted.
pub async fn load_file(store: &SqliteStore, path: &Path) -> Result<bool> {
  let json = tokio::fs::read_to_string(path)
    .await
    .map_err(|source| SeedError::Read { path: path.to_path_buf(), source })?;
  apply(store, Seed::parse(&json)?).await
}

/// Insert every place in `seed`, unless the store already has places. The
/// load is all or nothing.
pub async fn apply(store: &SqliteStore, seed: Seed) -> Result<bool> {
  match store.load_places(seed.into_places()).await? {
    Some(counts) => {
      tracing::info!(
        continents = counts.continents,
        countries = counts.countries,
        states = counts.states,
        "seeded places"
      );
      Ok(true)
    }
    None => {
      tracing::info!("store already has places; skipping seed");
      Ok(false)
    }
  }
}
