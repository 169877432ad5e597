//! Core use-case services.
//!
//! # Responsibility
//! - Expose the operation set consumed by the UI collaborator.
//! - Keep the collaborator decoupled from SQL and error types.

pub mod workout_service;
