//! Set repository contracts and SQLite implementation.
//!
//! Range checks on repetitions/weight belong to the input layer; storage
//! accepts any integer/real pair.

use crate::model::exercise::{ExerciseId, SetId, WorkoutSet};
use crate::repo::{begin_write, commit, row_exists, RepoError, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for sets scoped to an exercise.
pub trait SetRepository {
    fn create_set(
        &self,
        exercise_id: ExerciseId,
        repetitions: i64,
        weight: f64,
    ) -> RepoResult<WorkoutSet>;
    fn delete_set(&self, id: SetId) -> RepoResult<()>;
}

/// SQLite-backed set repository.
pub struct SqliteSetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSetRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SetRepository for SqliteSetRepository<'_> {
    fn create_set(
        &self,
        exercise_id: ExerciseId,
        repetitions: i64,
        weight: f64,
    ) -> RepoResult<WorkoutSet> {
        let tx = begin_write(self.conn)?;
        if !row_exists(
            &tx,
            "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1);",
            exercise_id,
        )? {
            return Err(RepoError::ExerciseNotFound(exercise_id));
        }

        tx.execute(
            "INSERT INTO sets (exerciseId, repetitions, weight) VALUES (?1, ?2, ?3);",
            params![exercise_id, repetitions, weight],
        )
        .map_err(RepoError::write)?;
        let id = tx.last_insert_rowid();
        commit(tx)?;

        Ok(WorkoutSet {
            id,
            exercise_id,
            repetitions,
            weight,
        })
    }

    fn delete_set(&self, id: SetId) -> RepoResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM sets WHERE id = ?1;", [id])
            .map_err(RepoError::write)?;
        if deleted == 0 {
            return Err(RepoError::NotFound { entity: "set", id });
        }
        Ok(())
    }
}
