//! Completion ledger record.

use super::training::TrainingId;
use serde::{Deserialize, Serialize};

/// Append-only marker that one training was performed once.
///
/// `training_id` is not required to reference a live training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: i64,
    pub training_id: TrainingId,
}
