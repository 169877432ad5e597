use anabolic_core::db::open_db_in_memory;
use anabolic_core::{
    load_exercises_for_training, ExerciseRepository, MuscleGroups, RepoError,
    SetRepository, SqliteExerciseRepository, SqliteSetRepository, SqliteTrainingRepository,
    TrainingRepository,
};
use rusqlite::Connection;

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn leg_day_scenario_returns_one_exercise_with_two_ordered_sets() {
    let conn = open_db_in_memory().unwrap();
    let trainings = SqliteTrainingRepository::new(&conn);
    let exercises = SqliteExerciseRepository::new(&conn);
    let sets = SqliteSetRepository::new(&conn);

    let leg_day = trainings
        .create_training("Leg Day", &["gluteus", "all_lower"].into())
        .unwrap();
    let squat = exercises
        .create_exercise("Squat", &["gluteus"].into(), leg_day.id)
        .unwrap();
    sets.create_set(squat.id, 10, 80.0).unwrap();
    sets.create_set(squat.id, 8, 85.5).unwrap();

    let loaded = load_exercises_for_training(&conn, leg_day.id).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].exercise, squat);
    let pairs: Vec<(i64, f64)> = loaded[0]
        .sets
        .iter()
        .map(|set| (set.repetitions, set.weight))
        .collect();
    assert_eq!(pairs, vec![(10, 80.0), (8, 85.5)]);
    assert_eq!(loaded[0].set_labels(), vec!["10 X 80kg", "8 X 85.5kg"]);
}

#[test]
fn exercise_without_sets_has_empty_set_list() {
    let conn = open_db_in_memory().unwrap();
    let training = SqliteTrainingRepository::new(&conn)
        .create_training("Pull", &["back"].into())
        .unwrap();
    SqliteExerciseRepository::new(&conn)
        .create_exercise("Row", &MuscleGroups::default(), training.id)
        .unwrap();

    let loaded = load_exercises_for_training(&conn, training.id).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].sets.is_empty());
    assert!(loaded[0].exercise.muscle_groups.is_empty());
}

#[test]
fn zero_valued_set_is_kept_as_a_real_set() {
    let conn = open_db_in_memory().unwrap();
    let training = SqliteTrainingRepository::new(&conn)
        .create_training("Core", &["abs"].into())
        .unwrap();
    let plank = SqliteExerciseRepository::new(&conn)
        .create_exercise("Plank", &["abs"].into(), training.id)
        .unwrap();
    SqliteSetRepository::new(&conn)
        .create_set(plank.id, 0, 0.0)
        .unwrap();

    let loaded = load_exercises_for_training(&conn, training.id).unwrap();
    assert_eq!(loaded[0].sets.len(), 1);
    assert_eq!(loaded[0].sets[0].repetitions, 0);
}

#[test]
fn exercises_are_scoped_to_their_training() {
    let conn = open_db_in_memory().unwrap();
    let trainings = SqliteTrainingRepository::new(&conn);
    let exercises = SqliteExerciseRepository::new(&conn);

    let push = trainings.create_training("Push", &["chest"].into()).unwrap();
    let pull = trainings.create_training("Pull", &["back"].into()).unwrap();
    exercises
        .create_exercise("Bench", &["chest"].into(), push.id)
        .unwrap();
    exercises
        .create_exercise("Deadlift", &["back"].into(), pull.id)
        .unwrap();
    exercises
        .create_exercise("Dips", &["chest"].into(), push.id)
        .unwrap();

    let names: Vec<String> = load_exercises_for_training(&conn, push.id)
        .unwrap()
        .into_iter()
        .map(|entry| entry.exercise.name)
        .collect();
    assert_eq!(names, vec!["Bench", "Dips"]);
}

#[test]
fn create_exercise_under_missing_training_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let err = SqliteExerciseRepository::new(&conn)
        .create_exercise("Squat", &["gluteus"].into(), 99)
        .unwrap_err();
    assert!(matches!(err, RepoError::TrainingNotFound(99)));
    assert_eq!(count(&conn, "exercises"), 0);
}

#[test]
fn create_set_under_missing_exercise_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let err = SqliteSetRepository::new(&conn)
        .create_set(7, 10, 50.0)
        .unwrap_err();
    assert!(matches!(err, RepoError::ExerciseNotFound(7)));
    assert_eq!(count(&conn, "sets"), 0);
}

#[test]
fn deleting_exercise_orphans_its_sets_without_surfacing_them() {
    let conn = open_db_in_memory().unwrap();
    let training = SqliteTrainingRepository::new(&conn)
        .create_training("Legs", &["all_lower"].into())
        .unwrap();
    let exercises = SqliteExerciseRepository::new(&conn);
    let lunge = exercises
        .create_exercise("Lunge", &["gluteus"].into(), training.id)
        .unwrap();
    SqliteSetRepository::new(&conn)
        .create_set(lunge.id, 12, 20.0)
        .unwrap();

    exercises.delete_exercise(lunge.id).unwrap();

    assert!(exercises.get_exercise(lunge.id).unwrap().is_none());
    assert!(load_exercises_for_training(&conn, training.id)
        .unwrap()
        .is_empty());
    assert_eq!(count(&conn, "sets"), 1);
}

#[test]
fn deleting_training_orphans_exercises_without_surfacing_them() {
    let conn = open_db_in_memory().unwrap();
    let trainings = SqliteTrainingRepository::new(&conn);
    let training = trainings
        .create_training("Gone", &["back"].into())
        .unwrap();
    SqliteExerciseRepository::new(&conn)
        .create_exercise("Row", &["back"].into(), training.id)
        .unwrap();

    trainings.delete_training(training.id).unwrap();

    assert!(load_exercises_for_training(&conn, training.id)
        .unwrap()
        .is_empty());
    assert_eq!(count(&conn, "exercises"), 1);
}

#[test]
fn delete_set_removes_only_that_set() {
    let conn = open_db_in_memory().unwrap();
    let training = SqliteTrainingRepository::new(&conn)
        .create_training("Push", &["chest"].into())
        .unwrap();
    let bench = SqliteExerciseRepository::new(&conn)
        .create_exercise("Bench", &["chest"].into(), training.id)
        .unwrap();
    let sets = SqliteSetRepository::new(&conn);
    let first = sets.create_set(bench.id, 5, 100.0).unwrap();
    let second = sets.create_set(bench.id, 5, 102.5).unwrap();

    sets.delete_set(first.id).unwrap();

    let loaded = load_exercises_for_training(&conn, training.id).unwrap();
    assert_eq!(loaded[0].sets, vec![second]);

    let err = sets.delete_set(first.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "set", .. }));
}

#[test]
fn deleting_last_set_returns_exercise_to_empty_state() {
    let conn = open_db_in_memory().unwrap();
    let training = SqliteTrainingRepository::new(&conn)
        .create_training("Push", &["chest"].into())
        .unwrap();
    let press = SqliteExerciseRepository::new(&conn)
        .create_exercise("Press", &["shoulders"].into(), training.id)
        .unwrap();
    let sets = SqliteSetRepository::new(&conn);
    let only = sets.create_set(press.id, 6, 40.0).unwrap();
    sets.delete_set(only.id).unwrap();

    let loaded = load_exercises_for_training(&conn, training.id).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].sets.is_empty());
}

#[test]
fn delete_missing_exercise_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = SqliteExerciseRepository::new(&conn)
        .delete_exercise(5)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "exercise",
            id: 5
        }
    ));
}

#[test]
fn legacy_set_with_null_weight_does_not_hide_valid_sets() {
    let conn = open_db_in_memory().unwrap();
    let training = SqliteTrainingRepository::new(&conn)
        .create_training("Legs", &["all_lower"].into())
        .unwrap();
    let squat = SqliteExerciseRepository::new(&conn)
        .create_exercise("Squat", &["gluteus"].into(), training.id)
        .unwrap();
    conn.execute(
        "INSERT INTO sets (exerciseId, repetitions, weight) VALUES (?1, 8, NULL);",
        [squat.id],
    )
    .unwrap();
    let valid = SqliteSetRepository::new(&conn)
        .create_set(squat.id, 10, 80.0)
        .unwrap();

    let loaded = load_exercises_for_training(&conn, training.id).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].sets, vec![valid]);
}
