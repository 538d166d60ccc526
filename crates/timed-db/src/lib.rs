//! Storage layer for timed.
//!
//! Provides persistence for working days using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but not shared without external
//! synchronization. timed runs one invocation at a time, so none is provided.
//!
//! # Schema
//!
//! A single `working_days` table holds one row per calendar date:
//! - `day` is TEXT in `%Y-%m-%d` form and carries a UNIQUE constraint
//! - `start` and `end` are TEXT in `%H:%M:%S` form
//! - `break_in_m` is the break in whole minutes
//! - `note` is bounded to 100 characters by a CHECK constraint
//!
//! # Transactions
//!
//! Mutations go through [`StoreTx`]. Nothing is written until [`StoreTx::commit`];
//! dropping a transaction rolls it back.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use thiserror::Error;

use timed_core::{NewWorkingDay, WorkingDay};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

const SELECT_COLUMNS: &str = r#"SELECT id, day, "start", "end", break_in_m, note FROM working_days"#;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored value could not be decoded.
    #[error("invalid {column} for working day {id}: {value}")]
    InvalidColumn {
        id: i64,
        column: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// An update targeted a row that does not exist.
    #[error("working day {0} does not exist")]
    MissingWorkingDay(i64),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// An open store transaction.
///
/// All reads see the writes made earlier in the same transaction.
pub struct StoreTx<'a> {
    tx: Transaction<'a>,
}

/// Undecoded row, as read from SQLite.
struct RawWorkingDay {
    id: i64,
    day: String,
    start: String,
    end: String,
    break_in_minutes: u32,
    note: String,
}

impl Database {
    /// Opens a database at the given path, creating the file if necessary.
    ///
    /// The schema is initialized on open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        tracing::debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    pub fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS working_days (
                id INTEGER PRIMARY KEY,
                day TEXT NOT NULL UNIQUE,
                break_in_m INTEGER NOT NULL DEFAULT 0,
                "start" TEXT NOT NULL,
                "end" TEXT NOT NULL,
                note VARCHAR(100) NOT NULL DEFAULT '' CHECK (length(note) <= 100)
            );
            "#,
        )?;
        Ok(())
    }

    /// Starts a transaction. Dropping it without [`StoreTx::commit`] discards its writes.
    pub fn transaction(&mut self) -> Result<StoreTx<'_>, DbError> {
        Ok(StoreTx {
            tx: self.conn.transaction()?,
        })
    }

    /// Finds the working day for a date.
    pub fn find_by_day(&self, day: NaiveDate) -> Result<Option<WorkingDay>, DbError> {
        find_by_day(&self.conn, day)
    }

    /// Lists all working days ordered by date.
    pub fn list_all(&self) -> Result<Vec<WorkingDay>, DbError> {
        list_all(&self.conn)
    }

    /// Lists working days between `from` and `to`, both inclusive, ordered by date.
    pub fn list_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<WorkingDay>, DbError> {
        list_range(&self.conn, from, to)
    }
}

impl StoreTx<'_> {
    /// Finds the working day for a date.
    pub fn find_by_day(&self, day: NaiveDate) -> Result<Option<WorkingDay>, DbError> {
        find_by_day(&self.tx, day)
    }

    /// Lists all working days ordered by date.
    pub fn list_all(&self) -> Result<Vec<WorkingDay>, DbError> {
        list_all(&self.tx)
    }

    /// Inserts a new working day and returns it with its assigned id.
    ///
    /// Fails with a constraint error if the date already has an entry.
    pub fn insert(&self, day: NewWorkingDay) -> Result<WorkingDay, DbError> {
        self.tx.execute(
            r#"INSERT INTO working_days (day, "start", "end", break_in_m, note) VALUES (?, ?, ?, ?, ?)"#,
            params![
                format_date(day.day),
                format_time(day.start),
                format_time(day.end),
                day.break_in_minutes,
                day.note,
            ],
        )?;
        let id = self.tx.last_insert_rowid();
        tracing::debug!(id, day = %day.day, "inserted working day");
        Ok(day.into_stored(id))
    }

    /// Writes all mutable fields of an existing working day.
    pub fn update(&self, day: &WorkingDay) -> Result<(), DbError> {
        let changed = self.tx.execute(
            r#"UPDATE working_days SET "start" = ?, "end" = ?, break_in_m = ?, note = ? WHERE id = ?"#,
            params![
                format_time(day.start),
                format_time(day.end),
                day.break_in_minutes,
                day.note,
                day.id,
            ],
        )?;
        if changed == 0 {
            return Err(DbError::MissingWorkingDay(day.id));
        }
        tracing::debug!(id = day.id, day = %day.day, "updated working day");
        Ok(())
    }

    /// Deletes a working day by id. Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, DbError> {
        let removed = self
            .tx
            .execute("DELETE FROM working_days WHERE id = ?", params![id])?;
        tracing::debug!(id, removed, "deleted working day");
        Ok(removed > 0)
    }

    /// Makes every write of this transaction durable.
    pub fn commit(self) -> Result<(), DbError> {
        self.tx.commit()?;
        Ok(())
    }
}

fn find_by_day(conn: &Connection, day: NaiveDate) -> Result<Option<WorkingDay>, DbError> {
    let raw = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE day = ?"),
            [format_date(day)],
            raw_from_row,
        )
        .optional()?;
    raw.map(RawWorkingDay::decode).transpose()
}

fn list_all(conn: &Connection) -> Result<Vec<WorkingDay>, DbError> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY day ASC"))?;
    let rows = stmt.query_map([], raw_from_row)?;
    let mut days = Vec::new();
    for row in rows {
        days.push(row?.decode()?);
    }
    Ok(days)
}

fn list_range(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<WorkingDay>, DbError> {
    if to < from {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE day >= ? AND day <= ? ORDER BY day ASC"
    ))?;
    let rows = stmt.query_map([format_date(from), format_date(to)], raw_from_row)?;
    let mut days = Vec::new();
    for row in rows {
        days.push(row?.decode()?);
    }
    Ok(days)
}

fn raw_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawWorkingDay> {
    Ok(RawWorkingDay {
        id: row.get(0)?,
        day: row.get(1)?,
        start: row.get(2)?,
        end: row.get(3)?,
        break_in_minutes: row.get(4)?,
        note: row.get(5)?,
    })
}

impl RawWorkingDay {
    fn decode(self) -> Result<WorkingDay, DbError> {
        let id = self.id;
        let day = NaiveDate::parse_from_str(&self.day, DATE_FORMAT).map_err(|source| {
            DbError::InvalidColumn {
                id,
                column: "day",
                value: self.day.clone(),
                source,
            }
        })?;
        let start = parse_stored_time(id, "start", &self.start)?;
        let end = parse_stored_time(id, "end", &self.end)?;
        Ok(WorkingDay {
            id,
            day,
            start,
            end,
            break_in_minutes: self.break_in_minutes,
            note: self.note,
        })
    }
}

fn parse_stored_time(id: i64, column: &'static str, value: &str) -> Result<NaiveTime, DbError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|source| DbError::InvalidColumn {
        id,
        column,
        value: value.to_string(),
        source,
    })
}

fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
