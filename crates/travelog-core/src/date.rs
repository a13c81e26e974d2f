//! Partial calendar dates and the visit date range built from them.
//!
//! A visit's year is always known; month and day may be missing for trips
//! recorded from memory. A missing component is a [`DatePart::Unknown`]
//! rather than a magic number, so every calculation has to say what an
//! unknown component means for it.

use std::{cmp, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── DatePart ────────────────────────────────────────────────────────────────

/// A month or day component that may be unknown.
///
/// `Unknown` orders before every known value, which matches the order of the
/// rendered labels (`"2019"` sorts before `"2019-06"`).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum DatePart {
  Unknown,
  Known(u32),
}

impl DatePart {
  /// The value persisted for an unknown component.
  pub const SENTINEL: i32 = -1;

  /// Decode a stored column value.
  pub fn from_raw(raw: i32) -> Result<Self> {
    if raw == Self::SENTINEL {
      return Ok(Self::Unknown);
    }
    match u32::try_from(raw) {
      Ok(value) if value > 0 => Ok(Self::Known(value)),
      _ => Err(Error::InvalidDatePart(raw)),
    }
  }

  /// Encode for storage.
  pub fn to_raw(self) -> i32 {
    match self {
      Self::Known(value) => i32::try_from(value).unwrap_or(i32::MAX),
      Self::Unknown => Self::SENTINEL,
    }
  }

  pub fn known(self) -> Option<u32> {
    match self {
      Self::Known(value) => Some(value),
      Self::Unknown => None,
    }
  }

  pub fn is_known(self) -> bool { matches!(self, Self::Known(_)) }
}

impl From<Option<u32>> for DatePart {
  fn from(value: Option<u32>) -> Self {
    value.map_or(Self::Unknown, Self::Known)
  }
}

impl From<DatePart> for Option<u32> {
  fn from(part: DatePart) -> Self { part.known() }
}

// ─── PartialDate ─────────────────────────────────────────────────────────────

/// A calendar date whose year is known but whose month and day may not be.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PartialDate {
  pub year:  i32,
  pub month: DatePart,
  pub day:   DatePart,
}

impl PartialDate {
  pub fn new(year: i32, month: DatePart, day: DatePart) -> Self {
    Self { year, month, day }
  }

  pub fn year_only(year: i32) -> Self {
    Self::new(year, DatePart::Unknown, DatePart::Unknown)
  }

  pub fn year_month(year: i32, month: u32) -> Self {
    Self::new(year, DatePart::Known(month), DatePart::Unknown)
  }

  pub fn is_complete(&self) -> bool {
    self.month.is_known() && self.day.is_known()
  }

  /// The concrete date, if every component is known and forms a valid date.
  pub fn to_naive(&self) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(self.year, self.month.known()?, self.day.known()?)
  }

  /// The last calendar date this partial date can denote: itself when
  /// complete, the end of the month when only the day is missing, and
  /// December 31 when only the year is known.
  pub fn latest(&self) -> Option<NaiveDate> {
    match (self.month, self.day) {
      (DatePart::Known(month), DatePart::Known(day)) => {
        NaiveDate::from_ymd_opt(self.year, month, day)
      }
      (DatePart::Known(month), DatePart::Unknown) => {
        last_day_of_month(self.year, month)
      }
      (DatePart::Unknown, _) => NaiveDate::from_ymd_opt(self.year, 12, 31),
    }
  }
}

impl From<NaiveDate> for PartialDate {
  fn from(date: NaiveDate) -> Self {
    use chrono::Datelike as _;
    Self::new(
      date.year(),
      DatePart::Known(date.month()),
      DatePart::Known(date.day()),
    )
  }
}

/// Renders `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, stopping at the first unknown
/// component.
impl fmt::Display for PartialDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}", self.year)?;
    if let DatePart::Known(month) = self.month {
      write!(f, "-{month:02}")?;
      if let DatePart::Known(day) = self.day {
        write!(f, "-{day:02}")?;
      }
    }
    Ok(())
  }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)?;
  let next = if month == 12 {
    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
  } else {
    NaiveDate::from_ymd_opt(year, month + 1, 1)?
  };
  next.pred_opt().filter(|last| *last >= first)
}

// ─── DateRange ───────────────────────────────────────────────────────────────

/// The span of a single visit. Ordered by start, then by end.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DateRange {
  pub start: PartialDate,
  pub end:   PartialDate,
}

impl DateRange {
  pub fn new(start: PartialDate, end: PartialDate) -> Self { Self { start, end } }

  pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
    Self::new(start.into(), end.into())
  }

  /// True when no month or day component on either end is unknown.
  pub fn is_complete(&self) -> bool {
    self.start.is_complete() && self.end.is_complete()
  }

  fn resolved(&self) -> Option<(NaiveDate, NaiveDate)> {
    Some((self.start.to_naive()?, self.end.to_naive()?))
  }

  /// Days spent, counting both endpoints. An incomplete range has no
  /// duration and yields 0.
  pub fn duration(&self) -> i64 {
    self
      .resolved()
      .map_or(0, |(start, end)| inclusive_days(start, end))
  }

  pub fn contains_year(&self, year: i32) -> bool {
    (self.start.year..=self.end.year).contains(&year)
  }

  /// Days of this range that fall inside calendar year `year`.
  pub fn days_within_year(&self, year: i32) -> i64 {
    if !self.contains_year(year) {
      return 0;
    }
    let Some((start, end)) = self.resolved() else {
      return 0;
    };
    let (Some(first), Some(last)) = (
      NaiveDate::from_ymd_opt(year, 1, 1),
      NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
      return 0;
    };
    inclusive_days(cmp::max(start, first), cmp::min(end, last))
  }

  /// Whether the visit is over by `today`.
  ///
  /// A partially known end counts as past only once the latest date it could
  /// denote is before `today`; `2019-06` is past from 2019-07-01 on.
  pub fn is_in_past(&self, today: NaiveDate) -> bool {
    self.end.latest().is_some_and(|end| end < today)
  }

  pub fn start_label(&self) -> String { self.start.to_string() }

  pub fn end_label(&self) -> String { self.end.to_string() }
}

fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
  (end.signed_duration_since(start).num_days() + 1).max(0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
