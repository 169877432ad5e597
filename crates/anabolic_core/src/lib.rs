//! Core data layer for Anabolic Archives.
//! Trainings, their exercises and sets, and the completion ledger live here.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::completion::CompletionRecord;
pub use model::exercise::{Exercise, ExerciseId, ExerciseWithSets, SetId, WorkoutSet};
pub use model::training::{MuscleGroups, Training, TrainingId, DATE_FORMAT};
pub use repo::completion_repo::{CompletionLedger, SqliteCompletionLedger};
pub use repo::exercise_query::load_exercises_for_training;
pub use repo::exercise_repo::{ExerciseRepository, SqliteExerciseRepository};
pub use repo::set_repo::{SetRepository, SqliteSetRepository};
pub use repo::training_repo::{SqliteTrainingRepository, TrainingRepository};
pub use repo::{RepoError, RepoResult};
pub use service::workout_service::{newest_first, HomeSummary, WorkoutService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
