//! Mapping between Rust domain types and SQLite rows.
//!
//! Visit dates are stored as six integer columns with `-1` standing for an
//! unknown day or month. The two visit collections share one row shape and
//! differ only in table and foreign-key column names.

use travelog_core::{
  date::{DatePart, DateRange, PartialDate},
  place::{Continent, Country, PlaceKind, State},
  visit::Visit,
};

use crate::Result;

pub type RowMapper<T> = fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>;

// ─── Visit tables ────────────────────────────────────────────────────────────

pub struct VisitTable {
  pub table:        &'static str,
  pub place_column: &'static str,
}

pub fn visit_table(kind: PlaceKind) -> VisitTable {
  match kind {
    PlaceKind::Country => VisitTable { table: "visit", place_column: "country" },
    PlaceKind::State => VisitTable { table: "visit_state", place_column: "state" },
  }
}

impl VisitTable {
  /// `SELECT` over every visit column, in [`RawVisit`] order.
  pub fn select(&self) -> String {
    format!(
      "SELECT id, {}, start_day, start_month, start_year, end_day, end_month, end_year
       FROM {}",
      self.place_column, self.table,
    )
  }

  pub fn order_by(&self) -> &'static str {
    "ORDER BY start_year, start_month, start_day, id"
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// `[start_day, start_month, start_year, end_day, end_month, end_year]`
pub fn encode_range(range: &DateRange) -> [i32; 6] {
  let DateRange { start, end } = range;
  [
    start.day.to_raw(),
    start.month.to_raw(),
    start.year,
    end.day.to_raw(),
    end.month.to_raw(),
    end.year,
  ]
}

fn decode_date(day: i32, month: i32, year: i32) -> Result<PartialDate> {
  Ok(PartialDate::new(
    year,
    DatePart::from_raw(month)?,
    DatePart::from_raw(day)?,
  ))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Integers read directly from a `visit` or `visit_state` row.
pub struct RawVisit {
  pub id:          i64,
  pub place_id:    i64,
  pub start_day:   i32,
  pub start_month: i32,
  pub start_year:  i32,
  pub end_day:     i32,
  pub end_month:   i32,
  pub end_year:    i32,
}

impl RawVisit {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      place_id:    row.get(1)?,
      start_day:   row.get(2)?,
      start_month: row.get(3)?,
      start_year:  row.get(4)?,
      end_day:     row.get(5)?,
      end_month:   row.get(6)?,
      end_year:    row.get(7)?,
    })
  }

  pub fn into_visit(self) -> Result<Visit> {
    Ok(Visit {
      id:       self.id,
      place_id: self.place_id,
      range:    DateRange::new(
        decode_date(self.start_day, self.start_month, self.start_year)?,
        decode_date(self.end_day, self.end_month, self.end_year)?,
      ),
    })
  }
}

pub fn continent_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Continent> {
  Ok(Continent { id: row.get(0)?, name: row.get(1)? })
}

pub fn country_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Country> {
  Ok(Country {
    id:           row.get(0)?,
    name:         row.get(1)?,
    continent_id: row.get(2)?,
  })
}

pub fn state_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<State> {
  Ok(State {
    id:         row.get(0)?,
    name:       row.get(1)?,
    country_id: row.get(2)?,
  })
}
