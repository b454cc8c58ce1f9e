//! Exercise record model.
//!
//! Field names match the on-disk catalog layout (snake_case). Only `id` and
//! `name` are required; everything else falls back to an empty value when a
//! record omits it.

use serde::{Deserialize, Serialize};

/// Identifier type for exercises.
pub type ExerciseId = String;

/// A single exercise entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered steps for performing the exercise.
    #[serde(default)]
    pub directions: Vec<String>,
    /// Ordered coaching tips.
    #[serde(default)]
    pub cues: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub body_part: String,
    #[serde(default)]
    pub primary_muscle_group: String,
    #[serde(default)]
    pub secondary_muscle_groups: Vec<String>,
    #[serde(default)]
    pub compound: bool,
    #[serde(default)]
    pub exercise_type: String,
    #[serde(default)]
    pub general_best_rep_range: RepRange,
}

/// Inclusive repetition range. Source data is expected to keep `low <= high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
    pub low: i32,
    pub high: i32,
}

impl Exercise {
    /// Whether the exercise lists `group` among its secondary muscle groups.
    pub fn works_secondary(&self, group: &str) -> bool {
        self.secondary_muscle_groups.iter().any(|g| g == group)
    }
}
