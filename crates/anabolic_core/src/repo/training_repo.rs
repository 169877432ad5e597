//! Training repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create, list and delete top-level training rows.
//! - Own the cascade purge of completion records on training delete.
//! - Provide the name-keyed bulk date correction used for backfills.
//!
//! # Invariants
//! - `delete_training` removes completion records and the training row in one
//!   transaction; a missing training rolls the purge back.
//! - Listing order is insertion order (`id ASC`); display order is a caller concern.
//! - Exercises and sets of a deleted training are left in place, unreachable.

use crate::model::training::{MuscleGroups, Training, TrainingId};
use crate::repo::{begin_write, commit, decode_date, decode_groups, encode_date};
use crate::repo::{RepoError, RepoResult};
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Row};

const TRAINING_SELECT_SQL: &str = "SELECT id, name, muscleGroups, dateAdded FROM trainings";

/// Repository interface for training CRUD operations.
pub trait TrainingRepository {
    /// Inserts a training dated `date`.
    fn create_training_on(
        &self,
        name: &str,
        muscle_groups: &MuscleGroups,
        date: NaiveDate,
    ) -> RepoResult<Training>;

    /// Inserts a training dated today (local calendar).
    fn create_training(&self, name: &str, muscle_groups: &MuscleGroups) -> RepoResult<Training> {
        self.create_training_on(name, muscle_groups, Local::now().date_naive())
    }

    fn get_training(&self, id: TrainingId) -> RepoResult<Option<Training>>;

    /// Lists every training in insertion order.
    fn list_trainings(&self) -> RepoResult<Vec<Training>>;

    /// Deletes completion records for `id`, then the training row, atomically.
    fn delete_training(&self, id: TrainingId) -> RepoResult<()>;

    /// Sets `dateAdded` on every training whose name matches, per `(date, name)` pair.
    ///
    /// Returns the number of rows changed.
    fn update_training_dates(&self, updates: &[(NaiveDate, String)]) -> RepoResult<usize>;
}

/// SQLite-backed training repository.
pub struct SqliteTrainingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTrainingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TrainingRepository for SqliteTrainingRepository<'_> {
    fn create_training_on(
        &self,
        name: &str,
        muscle_groups: &MuscleGroups,
        date: NaiveDate,
    ) -> RepoResult<Training> {
        self.conn
            .execute(
                "INSERT INTO trainings (name, muscleGroups, dateAdded) VALUES (?1, ?2, ?3);",
                params![name, muscle_groups.to_blob(), encode_date(date)],
            )
            .map_err(RepoError::write)?;

        Ok(Training {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            muscle_groups: muscle_groups.clone(),
            date_added: Some(date),
        })
    }

    fn get_training(&self, id: TrainingId) -> RepoResult<Option<Training>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRAINING_SELECT_SQL} WHERE id = ?1;"))
            .map_err(RepoError::query)?;
        let mut rows = stmt.query([id]).map_err(RepoError::query)?;
        match rows.next().map_err(RepoError::query)? {
            Some(row) => Ok(Some(parse_training_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_trainings(&self) -> RepoResult<Vec<Training>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRAINING_SELECT_SQL} ORDER BY id ASC;"))
            .map_err(RepoError::query)?;
        let mut rows = stmt.query([]).map_err(RepoError::query)?;

        let mut trainings = Vec::new();
        while let Some(row) = rows.next().map_err(RepoError::query)? {
            trainings.push(parse_training_row(row)?);
        }
        Ok(trainings)
    }

    fn delete_training(&self, id: TrainingId) -> RepoResult<()> {
        let tx = begin_write(self.conn)?;

        tx.execute(
            "DELETE FROM completed_trainings WHERE trainingId = ?1;",
            [id],
        )
        .map_err(RepoError::write)?;
        let deleted = tx
            .execute("DELETE FROM trainings WHERE id = ?1;", [id])
            .map_err(RepoError::write)?;

        if deleted == 0 {
            return Err(RepoError::NotFound {
                entity: "training",
                id,
            });
        }

        commit(tx)
    }

    fn update_training_dates(&self, updates: &[(NaiveDate, String)]) -> RepoResult<usize> {
        let tx = begin_write(self.conn)?;
        let mut changed = 0;
        {
            let mut stmt = tx
                .prepare("UPDATE trainings SET dateAdded = ?1 WHERE name = ?2;")
                .map_err(RepoError::write)?;
            for (date, name) in updates {
                changed += stmt
                    .execute(params![encode_date(*date), name])
                    .map_err(RepoError::write)?;
            }
        }
        commit(tx)?;
        Ok(changed)
    }
}

fn parse_training_row(row: &Row<'_>) -> RepoResult<Training> {
    let blob: Option<String> = row.get("muscleGroups").map_err(RepoError::query)?;
    let date_text: Option<String> = row.get("dateAdded").map_err(RepoError::query)?;
    let name: Option<String> = row.get("name").map_err(RepoError::query)?;

    Ok(Training {
        id: row.get("id").map_err(RepoError::query)?,
        name: name.unwrap_or_default(),
        muscle_groups: decode_groups(blob.as_deref(), "trainings.muscleGroups")?,
        date_added: decode_date(date_text.as_deref())?,
    })
}
