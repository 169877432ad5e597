//! Completion ledger: append-only record of performed trainings.
//!
//! # Invariants
//! - `mark_done` always appends; the ledger holds no uniqueness constraint.
//! - Records are only removed by `TrainingRepository::delete_training`.
//! - "Is this training done" is containment; "workouts completed" is the raw count.

use crate::model::completion::CompletionRecord;
use crate::model::training::TrainingId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Ledger interface for completion records.
pub trait CompletionLedger {
    fn mark_done(&self, training_id: TrainingId) -> RepoResult<CompletionRecord>;
    /// Training id of every record in insertion order, duplicates included.
    fn list_completed(&self) -> RepoResult<Vec<TrainingId>>;
    fn is_completed(&self, training_id: TrainingId) -> RepoResult<bool>;
    fn completed_workout_count(&self) -> RepoResult<u64>;
}

/// SQLite-backed completion ledger.
pub struct SqliteCompletionLedger<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompletionLedger<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CompletionLedger for SqliteCompletionLedger<'_> {
    fn mark_done(&self, training_id: TrainingId) -> RepoResult<CompletionRecord> {
        self.conn
            .execute(
                "INSERT INTO completed_trainings (trainingId) VALUES (?1);",
                [training_id],
            )
            .map_err(RepoError::write)?;

        Ok(CompletionRecord {
            id: self.conn.last_insert_rowid(),
            training_id,
        })
    }

    fn list_completed(&self) -> RepoResult<Vec<TrainingId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT trainingId FROM completed_trainings ORDER BY id ASC;")
            .map_err(RepoError::query)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, TrainingId>(0))
            .map_err(RepoError::query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepoError::query)?;
        Ok(ids)
    }

    fn is_completed(&self, training_id: TrainingId) -> RepoResult<bool> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM completed_trainings WHERE trainingId = ?1);",
                [training_id],
                |row| row.get(0),
            )
            .map_err(RepoError::query)?;
        Ok(exists == 1)
    }

    fn completed_workout_count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM completed_trainings;", [], |row| {
                row.get(0)
            })
            .map_err(RepoError::query)?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative completion count {count}")))
    }
}
