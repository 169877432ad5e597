//! Schema manager: base tables plus additive column evolution.
//!
//! # Responsibility
//! - Create the four fitness tables when absent.
//! - Add late columns (e.g. `trainings.dateAdded`) with add-if-missing semantics.
//!
//! # Invariants
//! - Safe to run on every process start, whatever the stored schema looks like.
//! - A "duplicate column" failure means the column is already there and is ignored.
//! - `PRAGMA user_version` mirrors the highest applied column version and never decreases.
//! - No business rows are read or written here.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::{Connection, Transaction, TransactionBehavior};

const BASE_TABLES_SQL: &str = include_str!("0001_base_tables.sql");

#[derive(Debug, Clone, Copy)]
struct ColumnMigration {
    version: u32,
    table: &'static str,
    column: &'static str,
    definition: &'static str,
}

const COLUMN_MIGRATIONS: &[ColumnMigration] = &[ColumnMigration {
    version: 2,
    table: "trainings",
    column: "dateAdded",
    // ALTER TABLE cannot add a column with a non-constant default; inserts set it.
    definition: "TEXT",
}];

/// Returns the schema version written by this binary.
pub fn latest_version() -> u32 {
    COLUMN_MIGRATIONS
        .iter()
        .map(|migration| migration.version)
        .max()
        .unwrap_or(1)
}

/// Reads the schema version stamped into `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Creates missing tables and applies additive column migrations.
///
/// All DDL runs in one transaction; on failure nothing is left half-applied.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = schema_version(conn)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(BASE_TABLES_SQL)
        .map_err(|source| DbError::Schema {
            table: "*",
            source,
        })?;

    for migration in COLUMN_MIGRATIONS {
        add_column_if_missing(&tx, migration)?;
    }

    let target_version = current_version.max(latest_version());
    if target_version != current_version {
        tx.execute_batch(&format!("PRAGMA user_version = {target_version};"))?;
    }
    tx.commit()?;

    Ok(())
}

fn add_column_if_missing(tx: &Transaction<'_>, migration: &ColumnMigration) -> DbResult<()> {
    let sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {};",
        migration.table, migration.column, migration.definition
    );

    match tx.execute_batch(&sql) {
        Ok(()) => {
            debug!(
                "event=schema_column module=db status=added table={} column={}",
                migration.table, migration.column
            );
            Ok(())
        }
        Err(err) if is_duplicate_column(&err) => Ok(()),
        Err(source) => Err(DbError::Schema {
            table: migration.table,
            source,
        }),
    }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            message.starts_with("duplicate column name")
        }
        _ => false,
    }
}
