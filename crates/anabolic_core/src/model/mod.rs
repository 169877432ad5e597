//! Fitness domain model: trainings, exercises, sets and completion records.
//!
//! # Responsibility
//! - Define the plain data shapes returned by repositories and services.
//! - Own the opaque muscle-group tag encoding.
//!
//! # Invariants
//! - Ids are SQLite surrogate keys and are never reused after deletion.
//! - Muscle-group tags keep caller order and duplicates.

pub mod completion;
pub mod exercise;
pub mod training;
