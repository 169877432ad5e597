//! SQLite storage bootstrap and schema management entry points.
//!
//! # Responsibility
//! - Open and configure the on-device SQLite store.
//! - Ensure the training/exercise/set/completion tables exist on every start.
//!
//! # Invariants
//! - Schema evolution is additive only; no column or table is ever dropped.
//! - Core code must not read/write application rows before `ensure_schema` succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// DDL statement failed for a reason other than an already-present column.
    Schema {
        table: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Schema { table, source } => {
                write!(f, "schema update for table `{table}` failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Schema { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
