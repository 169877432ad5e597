//! Training domain model and muscle-group tag encoding.
//!
//! # Responsibility
//! - Define the top-level workout container record.
//! - Serialize muscle-group tags to and from the persisted JSON text blob.
//!
//! # Invariants
//! - Tag order and duplicates survive a serialize/deserialize round-trip.
//! - An empty tag list is valid and never needs an image lookup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Surrogate key of a training row.
pub type TrainingId = i64;

/// Format used for `dateAdded` text values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered muscle-group tags attached to trainings and exercises.
///
/// Tags are opaque strings (`"gluteus"`, `"all_lower"`, ...); the core never
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleGroups(Vec<String>);

impl MuscleGroups {
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the presentation layer should ask the image service for these tags.
    pub fn needs_lookup(&self) -> bool {
        !self.0.is_empty()
    }

    /// Encodes tags as the JSON array text stored in `muscleGroups` columns.
    pub fn to_blob(&self) -> String {
        // Serializing a Vec<String> cannot fail.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decodes a stored blob. A NULL column decodes to an empty list.
    pub fn from_blob(blob: Option<&str>) -> Result<Self, serde_json::Error> {
        match blob {
            None => Ok(Self::default()),
            Some(text) => serde_json::from_str(text).map(Self),
        }
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for MuscleGroups {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<&[&str]> for MuscleGroups {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|tag| (*tag).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MuscleGroups {
    fn from(value: [&str; N]) -> Self {
        Self(value.iter().map(|tag| (*tag).to_string()).collect())
    }
}

/// Named workout session container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    /// Up to 20 characters by UI convention; storage does not enforce it.
    pub name: String,
    pub muscle_groups: MuscleGroups,
    /// `None` only for rows written before the `dateAdded` column existed.
    pub date_added: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::{MuscleGroups, Training};
    use chrono::NaiveDate;

    #[test]
    fn blob_roundtrip_keeps_order_and_duplicates() {
        let groups = MuscleGroups::from(["back", "chest", "back"]);
        let blob = groups.to_blob();
        assert_eq!(blob, r#"["back","chest","back"]"#);
        assert_eq!(MuscleGroups::from_blob(Some(&blob)).unwrap(), groups);
    }

    #[test]
    fn empty_groups_roundtrip_and_skip_lookup() {
        let groups = MuscleGroups::default();
        assert_eq!(groups.to_blob(), "[]");
        let decoded = MuscleGroups::from_blob(Some("[]")).unwrap();
        assert!(decoded.is_empty());
        assert!(!decoded.needs_lookup());
    }

    #[test]
    fn null_blob_decodes_to_empty() {
        assert!(MuscleGroups::from_blob(None).unwrap().is_empty());
    }

    #[test]
    fn malformed_blob_is_rejected() {
        assert!(MuscleGroups::from_blob(Some("gluteus,back")).is_err());
    }

    #[test]
    fn training_serializes_date_as_calendar_text() {
        let training = Training {
            id: 7,
            name: "Leg Day".to_string(),
            muscle_groups: MuscleGroups::from(["gluteus"]),
            date_added: NaiveDate::from_ymd_opt(2023, 12, 19),
        };

        let json = serde_json::to_value(&training).unwrap();
        assert_eq!(json["date_added"], "2023-12-19");
        assert_eq!(json["muscle_groups"], serde_json::json!(["gluteus"]));

        let decoded: Training = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, training);
    }
}
