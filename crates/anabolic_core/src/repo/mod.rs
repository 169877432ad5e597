//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Own every SQL statement touching fitness rows.
//! - Classify storage failures into write/query/transaction errors.
//!
//! # Invariants
//! - Multi-statement writes run inside one scoped transaction; dropping the
//!   transaction without `commit` rolls every statement back.
//! - Parent existence checks run in the same transaction as the child insert.

use crate::db::DbError;
use crate::model::exercise::ExerciseId;
use crate::model::training::{MuscleGroups, TrainingId, DATE_FORMAT};
use chrono::NaiveDate;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod completion_repo;
pub mod exercise_query;
pub mod exercise_repo;
pub mod set_repo;
pub mod training_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for fitness persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Insert/update/delete failed.
    Write(DbError),
    /// Read failed.
    Query(DbError),
    /// Begin or commit failed; statements issued in the scope were rolled back.
    Transaction(DbError),
    /// No row matched the id of a delete.
    NotFound { entity: &'static str, id: i64 },
    /// Exercise insert referenced a training that does not exist.
    TrainingNotFound(TrainingId),
    /// Set insert referenced an exercise that does not exist.
    ExerciseNotFound(ExerciseId),
    /// Persisted value could not be decoded.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn write(err: rusqlite::Error) -> Self {
        Self::Write(DbError::Sqlite(err))
    }

    pub(crate) fn query(err: rusqlite::Error) -> Self {
        Self::Query(DbError::Sqlite(err))
    }

    pub(crate) fn transaction(err: rusqlite::Error) -> Self {
        Self::Transaction(DbError::Sqlite(err))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(err) => write!(f, "write failed: {err}"),
            Self::Query(err) => write!(f, "query failed: {err}"),
            Self::Transaction(err) => write!(f, "transaction failed: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::TrainingNotFound(id) => write!(f, "training not found: {id}"),
            Self::ExerciseNotFound(id) => write!(f, "exercise not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Write(err) | Self::Query(err) | Self::Transaction(err) => Some(err),
            Self::NotFound { .. }
            | Self::TrainingNotFound(_)
            | Self::ExerciseNotFound(_)
            | Self::InvalidData(_) => None,
        }
    }
}

/// Starts an immediate write transaction on a shared connection handle.
///
/// Repositories only borrow the connection, so the checked
/// `Connection::transaction` (which needs `&mut`) is not available here.
pub(crate) fn begin_write(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(RepoError::transaction)
}

pub(crate) fn commit(tx: Transaction<'_>) -> RepoResult<()> {
    tx.commit().map_err(RepoError::transaction)
}

pub(crate) fn decode_groups(blob: Option<&str>, column: &str) -> RepoResult<MuscleGroups> {
    MuscleGroups::from_blob(blob).map_err(|err| {
        RepoError::InvalidData(format!("invalid muscle group tags in {column}: {err}"))
    })
}

pub(crate) fn decode_date(value: Option<&str>) -> RepoResult<Option<NaiveDate>> {
    value
        .map(|text| {
            NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!("invalid date `{text}` in trainings.dateAdded"))
            })
        })
        .transpose()
}

pub(crate) fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn row_exists(tx: &Transaction<'_>, sql: &str, id: i64) -> RepoResult<bool> {
    let exists: i64 = tx
        .query_row(sql, [id], |row| row.get(0))
        .map_err(RepoError::query)?;
    Ok(exists == 1)
}
