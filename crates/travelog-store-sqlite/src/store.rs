//! [`SqliteStore`], the SQLite implementation of [`TravelStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use travelog_core::{
  place::{Continent, Country, Id, PlaceKind, State},
  store::TravelStore,
  visit::{NewVisit, Visit},
};

use crate::{
  encode::{
    RawVisit, RowMapper, continent_row, country_row, encode_range, state_row,
    visit_table,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Travelog store backed by a single SQLite file.
///
/// Clones share the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql`, binding `param` as `?1` when present.
  async fn query<T>(
    &self,
    sql: String,
    param: Option<Id>,
    map: RowMapper<T>,
  ) -> Result<Vec<T>>
  where
    T: Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(param), map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn query_one<T>(
    &self,
    sql: &'static str,
    id: Id,
    map: RowMapper<T>,
  ) -> Result<Option<T>>
  where
    T: Send + 'static,
  {
    let row = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(sql, rusqlite::params![id], map).optional()?)
      })
      .await?;
    Ok(row)
  }

  async fn query_visits(&self, kind: PlaceKind, place_id: Option<Id>) -> Result<Vec<Visit>> {
    let table = visit_table(kind);
    let filter = if place_id.is_some() {
      format!("WHERE {} = ?1", table.place_column)
    } else {
      String::new()
    };
    let sql = format!("{} {filter} {}", table.select(), table.order_by());

    let raws = self.query(sql, place_id, RawVisit::from_row).await?;
    raws.into_iter().map(RawVisit::into_visit).collect()
  }

  /// Insert a row and return its id, or `None` if `parent_sql` finds no
  /// parent row for `parent_id`.
  async fn insert_child(
    &self,
    parent_sql: &'static str,
    insert_sql: &'static str,
    name: String,
    parent_id: Id,
  ) -> Result<Option<Id>> {
    let id = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(parent_sql, rusqlite::params![parent_id], |_| Ok(()))
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }
        conn.execute(insert_sql, rusqlite::params![name, parent_id])?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;
    Ok(id)
  }

  // ── Reference data ────────────────────────────────────────────────────────

  pub async fn add_continent(&self, name: impl Into<String>) -> Result<Continent> {
    let name = name.into();
    let row_name = name.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO continent (name) VALUES (?1)",
          rusqlite::params![row_name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(Continent { id, name })
  }

  pub async fn add_country(
    &self,
    name: impl Into<String>,
    continent_id: Id,
  ) -> Result<Country> {
    let name = name.into();
    let id = self
      .insert_child(
        "SELECT 1 FROM continent WHERE id = ?1",
        "INSERT INTO country (name, continent) VALUES (?1, ?2)",
        name.clone(),
        continent_id,
      )
      .await?
      .ok_or(Error::ParentNotFound { kind: "continent", id: continent_id })?;
    Ok(Country { id, name, continent_id })
  }

  pub async fn add_state(
    &self,
    name: impl Into<String>,
    country_id: Id,
  ) -> Result<State> {
    let name = name.into();
    let id = self
      .insert_child(
        "SELECT 1 FROM country WHERE id = ?1",
        "INSERT INTO state (name, country) VALUES (?1, ?2)",
        name.clone(),
        country_id,
      )
      .await?
      .ok_or(Error::ParentNotFound { kind: "country", id: country_id })?;
    Ok(State { id, name, country_id })
  }
}

// ─── Bulk place loading ──────────────────────────────────────────────────────

/// A continent with the countries and states to insert beneath it.
#[derive(Debug, Clone)]
pub struct NewContinent {
  pub name:      String,
  pub countries: Vec<NewCountry>,
}

#[derive(Debug, Clone)]
pub struct NewCountry {
  pub name:   String,
  pub states: Vec<String>,
}

/// Rows inserted by [`SqliteStore::load_places`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceCounts {
  pub continents: usize,
  pub countries:  usize,
  pub states:     usize,
}

impl SqliteStore {
  /// Insert a whole place hierarchy into an empty store, in one transaction.
  ///
  /// Returns `None` without writing anything if a continent already exists.
  /// On error nothing is kept, so the same load can be retried.
  pub async fn load_places(
    &self,
    continents: Vec<NewContinent>,
  ) -> Result<Option<PlaceCounts>> {
    let counts = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let populated = tx
          .query_row("SELECT 1 FROM continent LIMIT 1", [], |_| Ok(()))
          .optional()?
          .is_some();
        if populated {
          return Ok(None);
        }

        let mut counts = PlaceCounts::default();
        for continent in continents {
          tx.execute(
            "INSERT INTO continent (name) VALUES (?1)",
            rusqlite::params![continent.name],
          )?;
          let continent_id = tx.last_insert_rowid();
          counts.continents += 1;

          for country in continent.countries {
            tx.execute(
              "INSERT INTO country (name, continent) VALUES (?1, ?2)",
              rusqlite::params![country.name, continent_id],
            )?;
            let country_id = tx.last_insert_rowid();
            counts.countries += 1;

            for state in country.states {
              tx.execute(
                "INSERT INTO state (name, country) VALUES (?1, ?2)",
                rusqlite::params![state, country_id],
              )?;
              counts.states += 1;
            }
          }
        }

        tx.commit()?;
        Ok(Some(counts))
      })
      .await?;
    Ok(counts)
  }
}

// ─── TravelStore impl ────────────────────────────────────────────────────────

impl TravelStore for SqliteStore {
  type Error = Error;

  // ── Places ────────────────────────────────────────────────────────────────

  async fn list_continents(&self) -> Result<Vec<Continent>> {
    self
      .query(
        "SELECT id, name FROM continent ORDER BY name".into(),
        None,
        continent_row,
      )
      .await
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    self
      .query(
        "SELECT id, name, continent FROM country ORDER BY name".into(),
        None,
        country_row,
      )
      .await
  }

  async fn list_states(&self) -> Result<Vec<State>> {
    self
      .query(
        "SELECT id, name, country FROM state ORDER BY name".into(),
        None,
        state_row,
      )
      .await
  }

  async fn get_country(&self, id: Id) -> Result<Option<Country>> {
    self
      .query_one(
        "SELECT id, name, continent FROM country WHERE id = ?1",
        id,
        country_row,
      )
      .await
  }

  async fn get_state(&self, id: Id) -> Result<Option<State>> {
    self
      .query_one("SELECT id, name, country FROM state WHERE id = ?1", id, state_row)
      .await
  }

  async fn countries_in(&self, continent_id: Id) -> Result<Vec<Country>> {
    self
      .query(
        "SELECT id, name, continent FROM country WHERE continent = ?1 ORDER BY name"
          .into(),
        Some(continent_id),
        country_row,
      )
      .await
  }

  async fn states_in(&self, country_id: Id) -> Result<Vec<State>> {
    self
      .query(
        "SELECT id, name, country FROM state WHERE country = ?1 ORDER BY name".into(),
        Some(country_id),
        state_row,
      )
      .await
  }

  // ── Visits ────────────────────────────────────────────────────────────────

  async fn list_visits(&self, kind: PlaceKind) -> Result<Vec<Visit>> {
    self.query_visits(kind, None).await
  }

  async fn visits_to(&self, kind: PlaceKind, place_id: Id) -> Result<Vec<Visit>> {
    self.query_visits(kind, Some(place_id)).await
  }

  async fn record_visit(&self, kind: PlaceKind, input: NewVisit) -> Result<Visit> {
    let table = visit_table(kind);
    let sql = format!(
      "INSERT INTO {} (
         {}, start_day, start_month, start_year, end_day, end_month, end_year
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      table.table, table.place_column,
    );
    let place_id = input.place_id;
    let [start_day, start_month, start_year, end_day, end_month, end_year] =
      encode_range(&input.range);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          &sql,
          rusqlite::params![
            place_id,
            start_day,
            start_month,
            start_year,
            end_day,
            end_month,
            end_year,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Visit { id, place_id, range: input.range })
  }

  async fn delete_visit(&self, kind: PlaceKind, id: Id) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", visit_table(kind).table);
    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;
    Ok(deleted > 0)
  }
}
