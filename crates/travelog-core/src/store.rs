//! The `TravelStore` trait.
//!
//! Implemented by storage backends (e.g. `travelog-store-sqlite`). The
//! reporting engine never sees a store; callers fetch a snapshot through this
//! trait and hand the records to [`crate::report`].

use std::future::Future;

use crate::{
  place::{Continent, Country, Id, PlaceKind, State},
  visit::{NewVisit, Visit},
};

/// Abstraction over a Travelog storage backend.
///
/// Place tables are reference data and are read-only here. Visits are added
/// and deleted, never updated.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait TravelStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Places ────────────────────────────────────────────────────────────

  /// All continents, ordered by name.
  fn list_continents(
    &self,
  ) -> impl Future<Output = Result<Vec<Continent>, Self::Error>> + Send + '_;

  /// All countries, ordered by name.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  /// All states, ordered by name.
  fn list_states(
    &self,
  ) -> impl Future<Output = Result<Vec<State>, Self::Error>> + Send + '_;

  fn get_country(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  fn get_state(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<State>, Self::Error>> + Send + '_;

  /// Countries of one continent, ordered by name.
  fn countries_in(
    &self,
    continent_id: Id,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  /// States of one country, ordered by name.
  fn states_in(
    &self,
    country_id: Id,
  ) -> impl Future<Output = Result<Vec<State>, Self::Error>> + Send + '_;

  // ── Visits ────────────────────────────────────────────────────────────

  /// Every visit of `kind`, ordered by start year, month and day.
  fn list_visits(
    &self,
    kind: PlaceKind,
  ) -> impl Future<Output = Result<Vec<Visit>, Self::Error>> + Send + '_;

  /// Visits to a single place, in the same order as [`Self::list_visits`].
  fn visits_to(
    &self,
    kind: PlaceKind,
    place_id: Id,
  ) -> impl Future<Output = Result<Vec<Visit>, Self::Error>> + Send + '_;

  /// Persist a new visit and return it with its assigned id.
  fn record_visit(
    &self,
    kind: PlaceKind,
    input: NewVisit,
  ) -> impl Future<Output = Result<Visit, Self::Error>> + Send + '_;

  /// Delete a visit. Returns `false` when no visit with that id exists.
  fn delete_visit(
    &self,
    kind: PlaceKind,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
