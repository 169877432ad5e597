//! Flutter-facing bridge for the Anabolic Archives core.

pub mod api;
