//! Exercise and set records, plus the nested read model.

use super::training::{MuscleGroups, TrainingId};
use serde::{Deserialize, Serialize};

/// Surrogate key of an exercise row.
pub type ExerciseId = i64;

/// Surrogate key of a set row.
pub type SetId = i64;

/// Named movement performed within one training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub muscle_groups: MuscleGroups,
    pub training_id: TrainingId,
}

/// One repetition/weight pair recorded against an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: SetId,
    pub exercise_id: ExerciseId,
    pub repetitions: i64,
    /// Kilograms.
    pub weight: f64,
}

impl WorkoutSet {
    /// Display label used by the exercise cards, e.g. `10 X 80kg`.
    pub fn label(&self) -> String {
        format!("{} X {}kg", self.repetitions, self.weight)
    }
}

/// Exercise with its sets in insertion order.
///
/// `sets` is empty for an exercise that has no sets yet; it never contains a
/// placeholder entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseWithSets {
    pub exercise: Exercise,
    pub sets: Vec<WorkoutSet>,
}

impl ExerciseWithSets {
    pub fn has_sets(&self) -> bool {
        !self.sets.is_empty()
    }

    pub fn set_labels(&self) -> Vec<String> {
        self.sets.iter().map(WorkoutSet::label).collect()
    }
}
