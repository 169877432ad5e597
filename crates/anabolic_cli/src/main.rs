//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `anabolic_core` linkage and schema bootstrap without the mobile runtime.
//! - With a path argument, report row counts of an existing fitness database.

use anabolic_core::db::migrations::schema_version;
use anabolic_core::db::{open_db, open_db_in_memory};
use anabolic_core::{
    CompletionLedger, SqliteCompletionLedger, SqliteTrainingRepository, TrainingRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("anabolic_core ping={}", anabolic_core::ping());
    println!("anabolic_core version={}", anabolic_core::core_version());

    let opened = match std::env::args().nth(1) {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("anabolic_core db_open failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let trainings = SqliteTrainingRepository::new(&conn).list_trainings();
    let workouts = SqliteCompletionLedger::new(&conn).completed_workout_count();
    match (schema_version(&conn), trainings, workouts) {
        (Ok(version), Ok(trainings), Ok(workouts)) => {
            println!("anabolic_core schema_version={version}");
            println!("anabolic_core trainings={}", trainings.len());
            println!("anabolic_core completed_workouts={workouts}");
            ExitCode::SUCCESS
        }
        (version, trainings, workouts) => {
            if let Err(err) = version {
                eprintln!("anabolic_core schema_version failed: {err}");
            }
            if let Err(err) = trainings {
                eprintln!("anabolic_core trainings failed: {err}");
            }
            if let Err(err) = workouts {
                eprintln!("anabolic_core completed_workouts failed: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
