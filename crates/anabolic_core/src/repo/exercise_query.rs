//! Hierarchical query assembler for a training's exercises and sets.
//!
//! # Responsibility
//! - Run the exercise ⟕ set join for one training.
//! - Fold the flat joined rows into one `ExerciseWithSets` per exercise.
//!
//! # Invariants
//! - An exercise without sets arrives as one row whose set columns are all
//!   NULL; it folds to an empty `sets` list, never a phantom set.
//! - Exercises keep insertion order, sets keep row-arrival (insertion) order.
//! - A set row with only some columns NULL is skipped with a warning; it never
//!   hides the rest of the training.
//! - The join goes through `trainings`, so exercises orphaned by a training
//!   delete never surface.

use crate::model::exercise::{Exercise, ExerciseId, ExerciseWithSets, SetId, WorkoutSet};
use crate::model::training::TrainingId;
use crate::repo::{decode_groups, RepoError, RepoResult};
use log::warn;
use rusqlite::{Connection, Row};
use std::collections::HashMap;

const EXERCISES_WITH_SETS_SQL: &str = "SELECT
    e.id AS exercise_id,
    e.name AS exercise_name,
    e.muscleGroups AS muscle_groups,
    e.trainingId AS training_id,
    s.id AS set_id,
    s.repetitions AS repetitions,
    s.weight AS weight
FROM exercises e
INNER JOIN trainings t ON t.id = e.trainingId
LEFT JOIN sets s ON s.exerciseId = e.id
WHERE e.trainingId = ?1
ORDER BY e.id ASC, s.id ASC;";

/// One row of the exercise/set join before folding.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub exercise: Exercise,
    pub set_id: Option<SetId>,
    pub repetitions: Option<i64>,
    pub weight: Option<f64>,
}

impl JoinedRow {
    /// The outer join's stand-in for "no sets": every set column NULL.
    fn is_placeholder(&self) -> bool {
        self.set_id.is_none() && self.repetitions.is_none() && self.weight.is_none()
    }
}

/// Loads every exercise of `training_id` with its sets nested.
pub fn load_exercises_for_training(
    conn: &Connection,
    training_id: TrainingId,
) -> RepoResult<Vec<ExerciseWithSets>> {
    let mut stmt = conn
        .prepare(EXERCISES_WITH_SETS_SQL)
        .map_err(RepoError::query)?;
    let mut rows = stmt.query([training_id]).map_err(RepoError::query)?;

    let mut joined = Vec::new();
    while let Some(row) = rows.next().map_err(RepoError::query)? {
        joined.push(parse_joined_row(row)?);
    }

    Ok(fold_exercise_rows(joined))
}

/// Folds joined rows into nested per-exercise entries.
pub fn fold_exercise_rows(rows: Vec<JoinedRow>) -> Vec<ExerciseWithSets> {
    let mut positions: HashMap<ExerciseId, usize> = HashMap::new();
    let mut folded: Vec<ExerciseWithSets> = Vec::new();

    for row in rows {
        let index = *positions.entry(row.exercise.id).or_insert_with(|| {
            folded.push(ExerciseWithSets {
                exercise: row.exercise.clone(),
                sets: Vec::new(),
            });
            folded.len() - 1
        });

        if row.is_placeholder() {
            continue;
        }

        let exercise_id = row.exercise.id;
        let (Some(id), Some(repetitions), Some(weight)) = (row.set_id, row.repetitions, row.weight)
        else {
            warn!(
                "event=exercise_list module=repo status=skipped set_id={:?} exercise_id={exercise_id}",
                row.set_id
            );
            continue;
        };

        folded[index].sets.push(WorkoutSet {
            id,
            exercise_id,
            repetitions,
            weight,
        });
    }

    folded
}

fn parse_joined_row(row: &Row<'_>) -> RepoResult<JoinedRow> {
    let name: Option<String> = row.get("exercise_name").map_err(RepoError::query)?;
    let blob: Option<String> = row.get("muscle_groups").map_err(RepoError::query)?;

    Ok(JoinedRow {
        exercise: Exercise {
            id: row.get("exercise_id").map_err(RepoError::query)?,
            name: name.unwrap_or_default(),
            muscle_groups: decode_groups(blob.as_deref(), "exercises.muscleGroups")?,
            training_id: row.get("training_id").map_err(RepoError::query)?,
        },
        set_id: row.get("set_id").map_err(RepoError::query)?,
        repetitions: row.get("repetitions").map_err(RepoError::query)?,
        weight: row.get("weight").map_err(RepoError::query)?,
    })
}
