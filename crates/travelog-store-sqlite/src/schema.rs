//! SQL schema for the Travelog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS continent (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS country (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    continent  INTEGER NOT NULL REFERENCES continent(id)
);

CREATE TABLE IF NOT EXISTS state (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    country  INTEGER NOT NULL REFERENCES country(id)
);

-- Day and month columns hold -1 when unknown; years are always known.
CREATE TABLE IF NOT EXISTS visit (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    country      INTEGER NOT NULL REFERENCES country(id),
    start_day    INTEGER NOT NULL CHECK (start_day   = -1 OR start_day   BETWEEN 1 AND 31),
    start_month  INTEGER NOT NULL CHECK (start_month = -1 OR start_month BETWEEN 1 AND 12),
    start_year   INTEGER NOT NULL,
    end_day      INTEGER NOT NULL CHECK (end_day     = -1 OR end_day     BETWEEN 1 AND 31),
    end_month    INTEGER NOT NULL CHECK (end_month   = -1 OR end_month   BETWEEN 1 AND 12),
    end_year     INTEGER NOT NULL
);

-- Same shape as `visit`, referencing states. Independent of country visits.
CREATE TABLE IF NOT EXISTS visit_state (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    state        INTEGER NOT NULL REFERENCES state(id),
    start_day    INTEGER NOT NULL CHECK (start_day   = -1 OR start_day   BETWEEN 1 AND 31),
    start_month  INTEGER NOT NULL CHECK (start_month = -1 OR start_month BETWEEN 1 AND 12),
    start_year   INTEGER NOT NULL,
    end_day      INTEGER NOT NULL CHECK (end_day     = -1 OR end_day     BETWEEN 1 AND 31),
    end_month    INTEGER NOT NULL CHECK (end_month   = -1 OR end_month   BETWEEN 1 AND 12),
    end_year     INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS country_continent_idx ON country(continent);
CREATE INDEX IF NOT EXISTS state_country_idx     ON state(country);
CREATE INDEX IF NOT EXISTS visit_country_idx     ON visit(country);
CREATE INDEX IF NOT EXISTS visit_state_state_idx ON visit_state(state);

PRAGMA user_version = 1;
";
