//! The reporting engine.
//!
//! Every function here is pure: it receives a snapshot of visits and places
//! and returns view rows. Functions that resolve place names fail with
//! [`Error::UnknownPlace`] when a visit points at a place missing from the
//! snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  Error, Result,
  place::{ChildPlace, Continent, Country, Id, Place, State, Visitable},
  visit::Visit,
};

// ─── Place lookup ────────────────────────────────────────────────────────────

/// Id → place lookup over a snapshot of one place table.
pub struct PlaceIndex<'a, P> {
  by_id: HashMap<Id, &'a P>,
}

impl<'a, P: Visitable> PlaceIndex<'a, P> {
  pub fn new(places: &'a [P]) -> Self {
    Self { by_id: places.iter().map(|p| (p.id(), p)).collect() }
  }

  pub fn get(&self, id: Id) -> Result<&'a P> {
    self
      .by_id
      .get(&id)
      .copied()
      .ok_or(Error::UnknownPlace { kind: P::KIND, id })
  }

  pub fn name(&self, id: Id) -> Result<&'a str> {
    self.get(id).map(|place| place.name())
  }
}

// ─── Past / future ───────────────────────────────────────────────────────────

/// Partition visits into those over by `today` and the rest, keeping order.
pub fn split_by_tense(
  visits: Vec<Visit>,
  today: NaiveDate,
) -> (Vec<Visit>, Vec<Visit>) {
  visits.into_iter().partition(|visit| visit.is_in_past(today))
}

// ─── Chronological list ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitRow {
  pub id:    Id,
  pub start: String,
  pub end:   String,
  pub place: String,
}

/// Visits with their place names, most recent first.
pub fn chronological<P: Visitable>(
  visits: &[Visit],
  places: &[P],
) -> Result<Vec<VisitRow>> {
  let index = PlaceIndex::new(places);
  let mut sorted: Vec<&Visit> = visits.iter().collect();
  sorted.sort_by(|a, b| b.range.cmp(&a.range));

  sorted
    .into_iter()
    .map(|visit| {
      Ok(VisitRow {
        id:    visit.id,
        start: visit.range.start_label(),
        end:   visit.range.end_label(),
        place: index.name(visit.place_id)?.to_owned(),
      })
    })
    .collect()
}

// ─── Leaderboards ────────────────────────────────────────────────────────────

/// What a leaderboard ranks places by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
  VisitCount,
  TotalDays,
}

impl Metric {
  fn measure(self, visits: &[&Visit]) -> i64 {
    match self {
      Self::VisitCount => visits.len() as i64,
      Self::TotalDays => visits.iter().map(|v| v.range.duration()).sum(),
    }
  }
}

/// All places sharing one metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
  pub value:  i64,
  pub places: Vec<String>,
}

/// Rank places by `metric` over `past` visits. Each distinct value gets one
/// row, highest first, with its places in alphabetical order.
pub fn leaderboard<P: Visitable>(
  past: &[Visit],
  places: &[P],
  metric: Metric,
) -> Result<Vec<LeaderboardRow>> {
  let index = PlaceIndex::new(places);

  let mut by_place: BTreeMap<Id, Vec<&Visit>> = BTreeMap::new();
  for visit in past {
    by_place.entry(visit.place_id).or_default().push(visit);
  }

  let mut by_value: BTreeMap<i64, Vec<String>> = BTreeMap::new();
  for (place_id, visits) in &by_place {
    by_value
      .entry(metric.measure(visits))
      .or_default()
      .push(index.name(*place_id)?.to_owned());
  }

  Ok(
    by_value
      .into_iter()
      .rev()
      .map(|(value, mut places)| {
        places.sort();
        LeaderboardRow { value, places }
      })
      .collect(),
  )
}

// ─── Coverage ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoveredPlace {
  pub name:    String,
  pub visited: bool,
}

/// Visited status of every child of one parent place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
  pub name:    String,
  pub visited: usize,
  pub total:   usize,
  pub places:  Vec<CoveredPlace>,
}

impl Coverage {
  fn new(name: String, places: Vec<CoveredPlace>) -> Self {
    Self {
      name,
      visited: places.iter().filter(|p| p.visited).count(),
      total: places.len(),
      places,
    }
  }

  pub fn visited_count(&self) -> usize { self.visited }

  /// `"visited/total"`, e.g. `"3/12"`.
  pub fn summary(&self) -> String { format!("{}/{}", self.visited, self.total) }
}

fn coverage<P: Place, C: ChildPlace>(
  parents: Vec<&P>,
  children: &[C],
  visited: &HashSet<Id>,
) -> Vec<Coverage> {
  let mut parents = parents;
  parents.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));

  parents
    .into_iter()
    .map(|parent| {
      let mut places: Vec<CoveredPlace> = children
        .iter()
        .filter(|child| child.parent_id() == parent.id())
        .map(|child| CoveredPlace {
          name:    child.name().to_owned(),
          visited: visited.contains(&child.id()),
        })
        .collect();
      places.sort_by(|a, b| a.name.cmp(&b.name));
      Coverage::new(parent.name().to_owned(), places)
    })
    .collect()
}

fn visited_ids(past: &[Visit]) -> HashSet<Id> {
  past.iter().map(|visit| visit.place_id).collect()
}

/// Every continent with every one of its countries, flagged by whether a
/// past country visit exists.
pub fn continent_coverage(
  continents: &[Continent],
  countries: &[Country],
  past: &[Visit],
) -> Vec<Coverage> {
  coverage(continents.iter().collect(), countries, &visited_ids(past))
}

/// Every country that has states, with every one of its states flagged by
/// whether a past state visit exists. The country itself need not have been
/// visited.
pub fn state_coverage(
  countries: &[Country],
  states: &[State],
  past: &[Visit],
) -> Result<Vec<Coverage>> {
  let owners: BTreeSet<Id> = states.iter().map(|s| s.country_id).collect();
  let index = PlaceIndex::new(countries);
  let parents = owners
    .iter()
    .map(|id| index.get(*id))
    .collect::<Result<Vec<_>>>()?;

  Ok(coverage(parents, states, &visited_ids(past)))
}

// ─── Yearly statistics ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSummary {
  pub year:            i32,
  /// Visits whose range touches this year.
  pub total_visits:    usize,
  /// Places first visited this year.
  pub new_places:      usize,
  pub total_days:      i64,
  pub distinct_places: usize,
}

/// One summary per year from the earliest past visit through
/// `current_year`, newest first. No past visits means no rows.
pub fn yearly_stats(past: &[Visit], current_year: i32) -> Vec<YearSummary> {
  let Some(first_year) = past.iter().map(|v| v.range.start.year).min() else {
    return Vec::new();
  };

  let mut debut: HashMap<Id, i32> = HashMap::new();
  for visit in past {
    let year = visit.range.start.year;
    debut
      .entry(visit.place_id)
      .and_modify(|first| *first = (*first).min(year))
      .or_insert(year);
  }
  let mut new_by_year: HashMap<i32, usize> = HashMap::new();
  for year in debut.values() {
    *new_by_year.entry(*year).or_default() += 1;
  }

  (first_year..=current_year)
    .rev()
    .map(|year| {
      let within: Vec<&Visit> =
        past.iter().filter(|v| v.range.contains_year(year)).collect();
      YearSummary {
        year,
        total_visits: within.len(),
        new_places: new_by_year.get(&year).copied().unwrap_or(0),
        total_days: within.iter().map(|v| v.range.days_within_year(year)).sum(),
        distinct_places: within
          .iter()
          .map(|v| v.place_id)
          .collect::<HashSet<_>>()
          .len(),
      }
    })
    .collect()
}

// ─── Map ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapView {
  pub total_places: usize,
  /// Places with at least one past visit.
  pub past:         Vec<String>,
  /// Places with only upcoming visits.
  pub future:       Vec<String>,
}

/// Distinct visited places, split into past and future-only, each in order of
/// first appearance.
pub fn map_view<P: Visitable>(
  past: &[Visit],
  future: &[Visit],
  places: &[P],
) -> Result<MapView> {
  let index = PlaceIndex::new(places);
  let mut seen = HashSet::new();
  let mut names = |visits: &[Visit]| -> Result<Vec<String>> {
    visits
      .iter()
      .map(|visit| visit.place_id)
      .filter(|id| seen.insert(*id))
      .map(|id| index.name(id).map(str::to_owned))
      .collect()
  };

  let past = names(past)?;
  let future = names(future)?;
  Ok(MapView { total_places: past.len() + future.len(), past, future })
}

// ─── Pickers ─────────────────────────────────────────────────────────────────

/// A state with its country name, for choosing a state to add a visit to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateOption {
  pub id:      Id,
  pub state:   String,
  pub country: String,
}

pub fn state_options(
  states: &[State],
  countries: &[Country],
) -> Result<Vec<StateOption>> {
  let index = PlaceIndex::new(countries);
  states
    .iter()
    .map(|state| {
      Ok(StateOption {
        id:      state.id,
        state:   state.name.clone(),
        country: index.name(state.country_id)?.to_owned(),
      })
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
