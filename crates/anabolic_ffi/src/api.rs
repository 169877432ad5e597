//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose the training/exercise/set/completion operations as sync calls.
//! - Turn every storage failure into a logged, non-throwing envelope.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - `ok == false` (or an empty list with an error message) is the only
//!   failure signal; the UI keeps its previous state in that case.

use anabolic_core::db::open_db;
use anabolic_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    load_exercises_for_training, ping as ping_inner, CompletionLedger, ExerciseRepository,
    ExerciseWithSets, MuscleGroups, RepoResult, SetRepository, SqliteCompletionLedger,
    SqliteExerciseRepository, SqliteSetRepository, SqliteTrainingRepository, Training,
    TrainingRepository, DATE_FORMAT,
};
use chrono::NaiveDate;
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "anabolic_fitness.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Training card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingItem {
    pub id: i64,
    pub name: String,
    pub muscle_groups: Vec<String>,
    /// `YYYY-MM-DD`, absent for legacy rows.
    pub date_added: Option<String>,
}

/// One set line inside an exercise card.
#[derive(Debug, Clone, PartialEq)]
pub struct SetItem {
    pub id: i64,
    pub repetitions: i64,
    pub weight: f64,
    /// Pre-rendered `"{reps} X {weight}kg"`.
    pub label: String,
}

/// Exercise card data with nested sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseItem {
    pub id: i64,
    pub name: String,
    pub muscle_groups: Vec<String>,
    pub training_id: i64,
    /// Empty when the exercise has no sets yet.
    pub sets: Vec<SetItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingListResponse {
    pub ok: bool,
    pub items: Vec<TrainingItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseListResponse {
    pub ok: bool,
    pub items: Vec<ExerciseItem>,
    pub message: String,
}

/// Completion ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub ok: bool,
    /// One entry per record; duplicates are real repeated sessions.
    pub training_ids: Vec<i64>,
    /// Raw record count shown as total workouts.
    pub completed_workouts: u64,
    pub message: String,
}

/// Generic write result envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Created row id, when the action inserted one.
    pub id: Option<i64>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists trainings in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn trainings_list() -> TrainingListResponse {
    match with_connection("trainings_list", |conn| {
        SqliteTrainingRepository::new(conn).list_trainings()
    }) {
        Ok(trainings) => TrainingListResponse {
            ok: true,
            message: format!("Loaded {} training(s).", trainings.len()),
            items: trainings.into_iter().map(to_training_item).collect(),
        },
        Err(message) => TrainingListResponse {
            ok: false,
            items: Vec::new(),
            message,
        },
    }
}

/// Creates a training dated today.
#[flutter_rust_bridge::frb(sync)]
pub fn training_create(name: String, muscle_groups: Vec<String>) -> ActionResponse {
    let groups = MuscleGroups::new(muscle_groups);
    action("training_create", "Training saved.", |conn| {
        SqliteTrainingRepository::new(conn)
            .create_training(&name, &groups)
            .map(|training| Some(training.id))
    })
}

/// Deletes a training together with its completion records.
#[flutter_rust_bridge::frb(sync)]
pub fn training_delete(training_id: i64) -> ActionResponse {
    action("training_delete", "Training deleted.", |conn| {
        SqliteTrainingRepository::new(conn)
            .delete_training(training_id)
            .map(|()| None)
    })
}

/// Backfills `dateAdded` by training name from `(YYYY-MM-DD, name)` pairs.
#[flutter_rust_bridge::frb(sync)]
pub fn training_update_dates(updates: Vec<(String, String)>) -> ActionResponse {
    let mut parsed = Vec::with_capacity(updates.len());
    for (date, name) in updates {
        match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
            Ok(date) => parsed.push((date, name)),
            Err(_) => {
                return ActionResponse::failure(format!(
                    "training_update_dates failed: invalid date `{date}`"
                ))
            }
        }
    }

    match with_connection("training_update_dates", |conn| {
        SqliteTrainingRepository::new(conn).update_training_dates(&parsed)
    }) {
        Ok(changed) => ActionResponse::success(format!("Updated {changed} training(s)."), None),
        Err(message) => ActionResponse::failure(message),
    }
}

/// Loads a training's exercises with their sets nested.
#[flutter_rust_bridge::frb(sync)]
pub fn exercises_for_training(training_id: i64) -> ExerciseListResponse {
    match with_connection("exercises_for_training", |conn| {
        load_exercises_for_training(conn, training_id)
    }) {
        Ok(exercises) => ExerciseListResponse {
            ok: true,
            message: format!("Loaded {} exercise(s).", exercises.len()),
            items: exercises.into_iter().map(to_exercise_item).collect(),
        },
        Err(message) => ExerciseListResponse {
            ok: false,
            items: Vec::new(),
            message,
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn exercise_create(
    name: String,
    muscle_groups: Vec<String>,
    training_id: i64,
) -> ActionResponse {
    let groups = MuscleGroups::new(muscle_groups);
    action("exercise_create", "Exercise saved.", |conn| {
        SqliteExerciseRepository::new(conn)
            .create_exercise(&name, &groups, training_id)
            .map(|exercise| Some(exercise.id))
    })
}

/// Deletes one exercise; its sets are not removed.
#[flutter_rust_bridge::frb(sync)]
pub fn exercise_delete(exercise_id: i64) -> ActionResponse {
    action("exercise_delete", "Exercise deleted.", |conn| {
        SqliteExerciseRepository::new(conn)
            .delete_exercise(exercise_id)
            .map(|()| None)
    })
}

/// Adds a set from the raw text of the repetitions and weight fields.
#[flutter_rust_bridge::frb(sync)]
pub fn set_create(exercise_id: i64, repetitions: String, weight: String) -> ActionResponse {
    let (repetitions, weight) = match parse_set_input(&repetitions, &weight) {
        Ok(parsed) => parsed,
        Err(message) => return ActionResponse::failure(format!("set_create failed: {message}")),
    };
    action("set_create", "Set saved.", |conn| {
        SqliteSetRepository::new(conn)
            .create_set(exercise_id, repetitions, weight)
            .map(|set| Some(set.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_delete(set_id: i64) -> ActionResponse {
    action("set_delete", "Set deleted.", |conn| {
        SqliteSetRepository::new(conn).delete_set(set_id).map(|()| None)
    })
}

/// Appends a completion record. The caller checks `completed_list` first
/// when it wants at-most-once marking.
#[flutter_rust_bridge::frb(sync)]
pub fn training_mark_done(training_id: i64) -> ActionResponse {
    action("training_mark_done", "Training marked as done.", |conn| {
        SqliteCompletionLedger::new(conn)
            .mark_done(training_id)
            .map(|record| Some(record.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn completed_list() -> CompletionResponse {
    match with_connection("completed_list", |conn| {
        SqliteCompletionLedger::new(conn).list_completed()
    }) {
        Ok(training_ids) => CompletionResponse {
            ok: true,
            completed_workouts: training_ids.len() as u64,
            message: format!("{} completed workout(s).", training_ids.len()),
            training_ids,
        },
        Err(message) => CompletionResponse {
            ok: false,
            training_ids: Vec::new(),
            completed_workouts: 0,
            message,
        },
    }
}

/// Parses the set form fields into repetitions and kilograms.
fn parse_set_input(repetitions: &str, weight: &str) -> Result<(i64, f64), String> {
    let reps = repetitions
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("repetitions `{}` is not an integer", repetitions.trim()))?;
    let kilos = weight
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("weight `{}` is not a number", weight.trim()))?;
    if !kilos.is_finite() {
        return Err(format!("weight `{}` is not a number", weight.trim()));
    }
    Ok((reps, kilos))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ANABOLIC_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(
    operation: &'static str,
    f: impl FnOnce(&Connection) -> RepoResult<T>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        error!("event={operation} module=ffi status=error error_code=db_open_failed error={err}");
        format!("{operation} failed: database open failed: {err}")
    })?;
    f(&conn).map_err(|err| {
        error!("event={operation} module=ffi status=error error={err}");
        format!("{operation} failed: {err}")
    })
}

fn action(
    operation: &'static str,
    success_message: &str,
    f: impl FnOnce(&Connection) -> RepoResult<Option<i64>>,
) -> ActionResponse {
    match with_connection(operation, f) {
        Ok(id) => ActionResponse::success(success_message, id),
        Err(message) => ActionResponse::failure(message),
    }
}

fn to_training_item(training: Training) -> TrainingItem {
    TrainingItem {
        id: training.id,
        name: training.name,
        muscle_groups: training.muscle_groups.into_inner(),
        date_added: training
            .date_added
            .map(|date| date.format(DATE_FORMAT).to_string()),
    }
}

fn to_exercise_item(entry: ExerciseWithSets) -> ExerciseItem {
    let sets = entry
        .sets
        .iter()
        .map(|set| SetItem {
            id: set.id,
            repetitions: set.repetitions,
            weight: set.weight,
            label: set.label(),
        })
        .collect();
    ExerciseItem {
        id: entry.exercise.id,
        name: entry.exercise.name,
        muscle_groups: entry.exercise.muscle_groups.into_inner(),
        training_id: entry.exercise.training_id,
        sets,
    }
}
