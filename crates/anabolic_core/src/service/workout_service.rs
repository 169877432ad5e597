//! Workout use-case service for the UI collaborator.
//!
//! # Responsibility
//! - Own the storage context and hand out repositories per call.
//! - Deliver fresh result sets to caller-supplied continuations.
//! - Catch every storage error at the operation boundary and log it.
//!
//! # Invariants
//! - A continuation is invoked at most once, and only on success.
//! - A failed operation invokes nothing; prior persisted state is unchanged.
//! - Writes the UI follows with a re-read deliver that re-read from the same
//!   call, sequenced after the write.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::exercise::{ExerciseId, ExerciseWithSets, SetId, WorkoutSet};
use crate::model::training::{MuscleGroups, Training, TrainingId, DATE_FORMAT};
use crate::repo::completion_repo::{CompletionLedger, SqliteCompletionLedger};
use crate::repo::exercise_query::load_exercises_for_training;
use crate::repo::exercise_repo::{ExerciseRepository, SqliteExerciseRepository};
use crate::repo::set_repo::{SetRepository, SqliteSetRepository};
use crate::repo::training_repo::{SqliteTrainingRepository, TrainingRepository};
use crate::repo::{begin_write, commit, RepoError, RepoResult};
use chrono::NaiveDate;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;

/// Trainings created by `seed_sample_trainings`, with their sample dates.
const SAMPLE_TRAININGS: &[(&str, &[&str], &str)] = &[
    ("Testi1", &["all_lower"], "2023-12-19"),
    ("Testi2", &["all_upper"], "2023-09-09"),
    ("Testi3", &["back"], "2023-09-10"),
    ("Testi4", &["chest", "shoulders"], "2022-07-28"),
    ("Testi5", &["gluteus"], "2023-10-10"),
];

/// Aggregate shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeSummary {
    /// Raw completion record count; repeated sessions all count.
    pub completed_workouts: u64,
    pub trainings: usize,
}

/// Continuation-style workout service over one explicitly owned connection.
pub struct WorkoutService {
    conn: Connection,
}

impl WorkoutService {
    /// Wraps an already opened and schema-ensured connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the storage context.
    pub fn close(self) -> Result<(), rusqlite::Error> {
        self.conn.close().map_err(|(_, err)| err)
    }

    pub fn get_trainings(&self, on_result: impl FnOnce(Vec<Training>)) {
        let trainings = SqliteTrainingRepository::new(&self.conn);
        deliver("training_list", trainings.list_trainings(), on_result);
    }

    /// Creates a training dated today and delivers the refreshed list.
    pub fn save_training(
        &self,
        name: &str,
        muscle_groups: &MuscleGroups,
        on_result: impl FnOnce(Vec<Training>),
    ) {
        let trainings = SqliteTrainingRepository::new(&self.conn);
        let result = trainings
            .create_training(name, muscle_groups)
            .and_then(|created| {
                info!(
                    "event=training_save module=service status=ok training_id={}",
                    created.id
                );
                trainings.list_trainings()
            });
        deliver("training_save", result, on_result);
    }

    /// Deletes a training with its completion records and delivers the refreshed list.
    pub fn delete_training(&self, id: TrainingId, on_result: impl FnOnce(Vec<Training>)) {
        let trainings = SqliteTrainingRepository::new(&self.conn);
        let result = trainings
            .delete_training(id)
            .and_then(|()| trainings.list_trainings());
        deliver("training_delete", result, on_result);
    }

    pub fn update_training_dates(
        &self,
        updates: &[(NaiveDate, String)],
        on_result: impl FnOnce(Vec<Training>),
    ) {
        let trainings = SqliteTrainingRepository::new(&self.conn);
        let result = trainings.update_training_dates(updates).and_then(|changed| {
            info!("event=training_dates module=service status=ok changed={changed}");
            trainings.list_trainings()
        });
        deliver("training_dates", result, on_result);
    }

    /// Inserts the five sample trainings with their sample dates, all or nothing.
    pub fn seed_sample_trainings(&self, on_result: impl FnOnce(Vec<Training>)) {
        deliver("training_seed", self.seed_sample_trainings_inner(), on_result);
    }

    fn seed_sample_trainings_inner(&self) -> RepoResult<Vec<Training>> {
        let tx = begin_write(&self.conn)?;
        {
            let trainings = SqliteTrainingRepository::new(&tx);
            for (name, groups, date) in SAMPLE_TRAININGS {
                let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
                    RepoError::InvalidData(format!("invalid sample date `{date}`"))
                })?;
                trainings.create_training_on(name, &MuscleGroups::from(*groups), date)?;
            }
        }
        commit(tx)?;
        SqliteTrainingRepository::new(&self.conn).list_trainings()
    }

    pub fn load_exercises(
        &self,
        training_id: TrainingId,
        on_result: impl FnOnce(Vec<ExerciseWithSets>),
    ) {
        deliver(
            "exercise_list",
            load_exercises_for_training(&self.conn, training_id),
            on_result,
        );
    }

    pub fn save_exercise(
        &self,
        name: &str,
        muscle_groups: &MuscleGroups,
        training_id: TrainingId,
        on_result: impl FnOnce(Vec<ExerciseWithSets>),
    ) {
        let exercises = SqliteExerciseRepository::new(&self.conn);
        let result = exercises
            .create_exercise(name, muscle_groups, training_id)
            .and_then(|_| load_exercises_for_training(&self.conn, training_id));
        deliver("exercise_save", result, on_result);
    }

    /// Deletes one exercise (its sets stay orphaned) and reloads the training.
    pub fn delete_exercise(
        &self,
        id: ExerciseId,
        training_id: TrainingId,
        on_result: impl FnOnce(Vec<ExerciseWithSets>),
    ) {
        let exercises = SqliteExerciseRepository::new(&self.conn);
        let result = exercises
            .delete_exercise(id)
            .and_then(|()| load_exercises_for_training(&self.conn, training_id));
        deliver("exercise_delete", result, on_result);
    }

    pub fn save_set(
        &self,
        training_id: TrainingId,
        exercise_id: ExerciseId,
        repetitions: i64,
        weight: f64,
        on_result: impl FnOnce(Vec<ExerciseWithSets>),
    ) {
        let sets = SqliteSetRepository::new(&self.conn);
        let result = sets
            .create_set(exercise_id, repetitions, weight)
            .and_then(|set: WorkoutSet| {
                info!(
                    "event=set_save module=service status=ok set_id={} exercise_id={exercise_id}",
                    set.id
                );
                load_exercises_for_training(&self.conn, training_id)
            });
        deliver("set_save", result, on_result);
    }

    pub fn delete_set(
        &self,
        id: SetId,
        training_id: TrainingId,
        on_result: impl FnOnce(Vec<ExerciseWithSets>),
    ) {
        let sets = SqliteSetRepository::new(&self.conn);
        let result = sets
            .delete_set(id)
            .and_then(|()| load_exercises_for_training(&self.conn, training_id));
        deliver("set_delete", result, on_result);
    }

    /// Appends a completion record unconditionally and delivers the ledger.
    pub fn mark_done(&self, training_id: TrainingId, on_result: impl FnOnce(Vec<TrainingId>)) {
        let ledger = SqliteCompletionLedger::new(&self.conn);
        let result = ledger
            .mark_done(training_id)
            .and_then(|_| ledger.list_completed());
        deliver("training_mark_done", result, on_result);
    }

    /// Marks a training done unless the ledger already contains it.
    ///
    /// Delivers `true` when a record was appended by this call.
    pub fn mark_done_once(&self, training_id: TrainingId, on_result: impl FnOnce(bool)) {
        let ledger = SqliteCompletionLedger::new(&self.conn);
        let result = ledger.is_completed(training_id).and_then(|done| {
            if done {
                Ok(false)
            } else {
                ledger.mark_done(training_id).map(|_| true)
            }
        });
        deliver("training_mark_done_once", result, on_result);
    }

    pub fn get_completed(&self, on_result: impl FnOnce(Vec<TrainingId>)) {
        let ledger = SqliteCompletionLedger::new(&self.conn);
        deliver("training_completed", ledger.list_completed(), on_result);
    }

    pub fn home_summary(&self, on_result: impl FnOnce(HomeSummary)) {
        let ledger = SqliteCompletionLedger::new(&self.conn);
        let trainings = SqliteTrainingRepository::new(&self.conn);
        let result = ledger.completed_workout_count().and_then(|completed_workouts| {
            Ok(HomeSummary {
                completed_workouts,
                trainings: trainings.list_trainings()?.len(),
            })
        });
        deliver("home_summary", result, on_result);
    }
}

/// Reverse-chronological display order used by the training list.
///
/// Ties, including rows without a date, list the most recent insert first;
/// undated rows sort last.
pub fn newest_first(mut trainings: Vec<Training>) -> Vec<Training> {
    trainings.reverse();
    trainings.sort_by(|left, right| right.date_added.cmp(&left.date_added));
    trainings
}

fn deliver<T>(event: &'static str, result: RepoResult<T>, on_result: impl FnOnce(T)) {
    match result {
        Ok(value) => on_result(value),
        Err(err) => error!("event={event} module=service status=error error={err}"),
    }
}
