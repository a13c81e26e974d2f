//! The read-only place hierarchy: continents own countries, countries own
//! states.
//!
//! Countries and states are both places a visit can reference. The
//! [`Visitable`] trait lets every report and the mutation service work over
//! either kind without duplicating the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned row identifier.
pub type Id = i64;

/// Which visit collection a place and its visits live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
  Country,
  State,
}

impl PlaceKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Country => "country",
      Self::State => "state",
    }
  }
}

impl fmt::Display for PlaceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
  pub id:   Id,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub id:           Id,
  pub name:         String,
  pub continent_id: Id,
}

/// A sub-national region. Visits to states are recorded separately from
/// visits to their country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
  pub id:         Id,
  pub name:       String,
  pub country_id: Id,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

pub trait Place {
  fn id(&self) -> Id;
  fn name(&self) -> &str;
}

/// A place that belongs to a parent place.
pub trait ChildPlace: Place {
  fn parent_id(&self) -> Id;
}

/// A place visits can reference.
pub trait Visitable: Place {
  const KIND: PlaceKind;
}

impl Place for Continent {
  fn id(&self) -> Id { self.id }
  fn name(&self) -> &str { &self.name }
}

impl Place for Country {
  fn id(&self) -> Id { self.id }
  fn name(&self) -> &str { &self.name }
}

impl Place for State {
  fn id(&self) -> Id { self.id }
  fn name(&self) -> &str { &self.name }
}

impl ChildPlace for Country {
  fn parent_id(&self) -> Id { self.continent_id }
}

impl ChildPlace for State {
  fn parent_id(&self) -> Id { self.country_id }
}

impl Visitable for Country {
  const KIND: PlaceKind = PlaceKind::Country;
}

impl Visitable for State {
  const KIND: PlaceKind = PlaceKind::State;
}
