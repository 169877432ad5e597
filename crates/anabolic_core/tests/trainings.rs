use anabolic_core::db::open_db_in_memory;
use anabolic_core::{
    CompletionLedger, MuscleGroups, RepoError, SqliteCompletionLedger, SqliteTrainingRepository,
    TrainingRepository,
};
use chrono::{Local, NaiveDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_then_list_returns_matching_entry_dated_today() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);

    let groups = MuscleGroups::from(["gluteus", "all_lower"]);
    let created = repo.create_training("Leg Day", &groups).unwrap();
    let today = Local::now().date_naive();

    let listed = repo.list_trainings().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].name, "Leg Day");
    assert_eq!(listed[0].muscle_groups, groups);
    assert_eq!(listed[0].date_added, Some(today));
}

#[test]
fn muscle_groups_roundtrip_empty_and_duplicate_tags() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);

    let empty = repo
        .create_training("Mobility", &MuscleGroups::default())
        .unwrap();
    let repeated = repo
        .create_training("Arms", &MuscleGroups::from(["biceps", "triceps", "biceps"]))
        .unwrap();

    let listed = repo.list_trainings().unwrap();
    let loaded_empty = listed.iter().find(|t| t.id == empty.id).unwrap();
    assert!(loaded_empty.muscle_groups.is_empty());
    assert!(!loaded_empty.muscle_groups.needs_lookup());

    let loaded_repeated = listed.iter().find(|t| t.id == repeated.id).unwrap();
    assert_eq!(
        loaded_repeated.muscle_groups.as_slice(),
        ["biceps", "triceps", "biceps"].map(String::from)
    );
}

#[test]
fn list_is_insertion_order_with_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);

    let first = repo
        .create_training_on("First", &["back"].into(), date(2024, 5, 1))
        .unwrap();
    let second = repo
        .create_training_on("Second", &["chest"].into(), date(2023, 1, 1))
        .unwrap();
    assert!(second.id > first.id);

    let names: Vec<String> = repo
        .list_trainings()
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);

    let doomed = repo.create_training("Doomed", &["back"].into()).unwrap();
    repo.delete_training(doomed.id).unwrap();
    let next = repo.create_training("Next", &["back"].into()).unwrap();
    assert!(next.id > doomed.id);
}

#[test]
fn update_training_dates_updates_every_row_sharing_a_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);

    repo.create_training("Testi1", &["all_lower"].into()).unwrap();
    repo.create_training("Testi2", &["all_upper"].into()).unwrap();
    repo.create_training("Testi2", &["back"].into()).unwrap();

    let changed = repo
        .update_training_dates(&[(date(2023, 9, 9), "Testi2".to_string())])
        .unwrap();
    assert_eq!(changed, 2);

    let listed = repo.list_trainings().unwrap();
    for training in listed.iter().filter(|t| t.name == "Testi2") {
        assert_eq!(training.date_added, Some(date(2023, 9, 9)));
    }
    let untouched = listed.iter().find(|t| t.name == "Testi1").unwrap();
    assert_eq!(untouched.date_added, Some(Local::now().date_naive()));
}

#[test]
fn update_training_dates_with_unknown_name_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);
    repo.create_training("Real", &["back"].into()).unwrap();

    let changed = repo
        .update_training_dates(&[(date(2020, 1, 1), "Ghost".to_string())])
        .unwrap();
    assert_eq!(changed, 0);
}

#[test]
fn delete_training_purges_all_its_completion_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);
    let ledger = SqliteCompletionLedger::new(&conn);

    let kept = repo.create_training("Kept", &["back"].into()).unwrap();
    let doomed = repo.create_training("Doomed", &["chest"].into()).unwrap();
    ledger.mark_done(doomed.id).unwrap();
    ledger.mark_done(kept.id).unwrap();
    ledger.mark_done(doomed.id).unwrap();

    repo.delete_training(doomed.id).unwrap();

    assert_eq!(ledger.list_completed().unwrap(), vec![kept.id]);
    assert!(repo.get_training(doomed.id).unwrap().is_none());
    assert!(repo.get_training(kept.id).unwrap().is_some());
}

#[test]
fn delete_missing_training_rolls_back_and_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);
    let ledger = SqliteCompletionLedger::new(&conn);

    // A ledger entry may outlive its training; a failed delete must not touch it.
    ledger.mark_done(42).unwrap();

    let err = repo.delete_training(42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "training",
            id: 42
        }
    ));
    assert_eq!(ledger.list_completed().unwrap(), vec![42]);
}

#[test]
fn failed_training_row_delete_keeps_completion_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::new(&conn);
    let ledger = SqliteCompletionLedger::new(&conn);

    let training = repo.create_training("Locked", &["back"].into()).unwrap();
    ledger.mark_done(training.id).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER block_training_delete BEFORE DELETE ON trainings
         BEGIN SELECT RAISE(ABORT, 'locked'); END;",
    )
    .unwrap();

    let err = repo.delete_training(training.id).unwrap_err();
    assert!(matches!(err, RepoError::Write(_)));
    assert_eq!(ledger.list_completed().unwrap(), vec![training.id]);
    assert!(repo.get_training(training.id).unwrap().is_some());
}

#[test]
fn malformed_muscle_group_blob_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO trainings (name, muscleGroups, dateAdded) VALUES ('Bad', 'not json', '2024-01-01');",
        [],
    )
    .unwrap();

    let err = SqliteTrainingRepository::new(&conn)
        .list_trainings()
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
