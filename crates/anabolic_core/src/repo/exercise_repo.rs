//! Exercise repository contracts and SQLite implementation.
//!
//! # Invariants
//! - An exercise is only inserted under a training that exists at that moment.
//! - Deleting an exercise leaves its sets in place; they stay unreachable
//!   because set reads always go through the exercise row.

use crate::model::exercise::{Exercise, ExerciseId};
use crate::model::training::{MuscleGroups, TrainingId};
use crate::repo::{begin_write, commit, decode_groups, row_exists, RepoError, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for exercises scoped to a training.
pub trait ExerciseRepository {
    fn create_exercise(
        &self,
        name: &str,
        muscle_groups: &MuscleGroups,
        training_id: TrainingId,
    ) -> RepoResult<Exercise>;
    fn get_exercise(&self, id: ExerciseId) -> RepoResult<Option<Exercise>>;
    /// Deletes the exercise row only.
    fn delete_exercise(&self, id: ExerciseId) -> RepoResult<()>;
}

/// SQLite-backed exercise repository.
pub struct SqliteExerciseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExerciseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExerciseRepository for SqliteExerciseRepository<'_> {
    fn create_exercise(
        &self,
        name: &str,
        muscle_groups: &MuscleGroups,
        training_id: TrainingId,
    ) -> RepoResult<Exercise> {
        let tx = begin_write(self.conn)?;
        if !row_exists(
            &tx,
            "SELECT EXISTS(SELECT 1 FROM trainings WHERE id = ?1);",
            training_id,
        )? {
            return Err(RepoError::TrainingNotFound(training_id));
        }

        tx.execute(
            "INSERT INTO exercises (name, muscleGroups, trainingId) VALUES (?1, ?2, ?3);",
            params![name, muscle_groups.to_blob(), training_id],
        )
        .map_err(RepoError::write)?;
        let id = tx.last_insert_rowid();
        commit(tx)?;

        Ok(Exercise {
            id,
            name: name.to_string(),
            muscle_groups: muscle_groups.clone(),
            training_id,
        })
    }

    fn get_exercise(&self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, muscleGroups, trainingId FROM exercises WHERE id = ?1;")
            .map_err(RepoError::query)?;
        let mut rows = stmt.query([id]).map_err(RepoError::query)?;
        let Some(row) = rows.next().map_err(RepoError::query)? else {
            return Ok(None);
        };

        let name: Option<String> = row.get("name").map_err(RepoError::query)?;
        let blob: Option<String> = row.get("muscleGroups").map_err(RepoError::query)?;
        Ok(Some(Exercise {
            id: row.get("id").map_err(RepoError::query)?,
            name: name.unwrap_or_default(),
            muscle_groups: decode_groups(blob.as_deref(), "exercises.muscleGroups")?,
            training_id: row.get("trainingId").map_err(RepoError::query)?,
        }))
    }

    fn delete_exercise(&self, id: ExerciseId) -> RepoResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM exercises WHERE id = ?1;", [id])
            .map_err(RepoError::write)?;
        if deleted == 0 {
            return Err(RepoError::NotFound {
                entity: "exercise",
                id,
            });
        }
        Ok(())
    }
}
