//! SQLite persistence for the fused dictionary.
//!
//! One [`KanjiStore`] owns one connection. Imports replace the whole dataset
//! in a single transaction; queries only read. Open one store per reader.

mod loader;
mod query;
mod schema;


use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OpenFlags, Row, ToSql};
use tracing::debug;

use crate::entry::{level_rank, Category, Entry, Level};

pub use loader::ImportStats;
pub use query::{SearchMode, StoreInfo};
pub use schema::NO_FREQ;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Handle on a dictionary database.
pub struct KanjiStore {
    conn: Connection,
}

impl KanjiStore {
    /// Open (creating if needed) a database file for import and queries.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "store opened");
        Self::with_connection(conn)
    }

    /// Open an existing database file for queries only.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        register_functions(&conn)?;
        Ok(Self { conn })
    }
}

/// `regexp(pattern, text)` backs the `REGEXP` operator; `level_rank(level)`
/// orders results by level.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    conn.create_scalar_function("regexp", 2, flags, |ctx| {
        let re: Arc<Regex> = ctx.get_or_create_aux(0, |pattern| -> Result<_, BoxError> {
            Ok(Regex::new(pattern.as_str()?)?)
        })?;
        let is_match = match ctx.get_raw(1) {
            ValueRef::Null => false,
            text => re.is_match(
                text.as_str()
                    .map_err(|e| rusqlite::Error::UserFunctionError(e.into()))?,
            ),
        };
        Ok(is_match)
    })?;
    conn.create_scalar_function("level_rank", 1, flags, |ctx| {
        let level: Option<String> = ctx.get(0)?;
        Ok(level_rank(level.as_deref()))
    })
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

impl ToSql for Level {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Level {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// List fields are stored newline-joined.
fn join_list(items: &[String]) -> String {
    items.join("\n")
}

/// Inverse of [`join_list`]; the empty string is the empty list.
fn split_list(text: String) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').map(str::to_string).collect()
    }
}

/// Decode a row selected with [`schema::ENTRY_COLUMNS`].
fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let text: String = row.get(1)?;
    let mut chars = text.chars();
    let char = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                format!("not a single character: {text:?}").into(),
            ))
        }
    };
    Ok(Entry {
        char,
        category: row.get(2)?,
        level: row.get(3)?,
        strokes: row.get(4)?,
        freq: row.get(5)?,
        jlpt: row.get(6)?,
        skip: row.get(7)?,
        rad: row.get(8)?,
        comp: row.get(9)?,
        on: split_list(row.get(10)?),
        kun: split_list(row.get(11)?),
        nanori: split_list(row.get(12)?),
        meaning: split_list(row.get(13)?),
    })
}
