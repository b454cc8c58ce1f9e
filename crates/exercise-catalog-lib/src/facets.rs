//! Facet enumeration over categorical exercise fields.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exercise::Exercise;

/// Categorical field that can be enumerated across the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    BodyPart,
    ExerciseType,
    PrimaryMuscleGroup,
}

impl Facet {
    /// The value of this facet on `exercise`.
    pub fn value_of<'a>(&self, exercise: &'a Exercise) -> &'a str {
        match self {
            Facet::BodyPart => &exercise.body_part,
            Facet::ExerciseType => &exercise.exercise_type,
            Facet::PrimaryMuscleGroup => &exercise.primary_muscle_group,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::BodyPart => "body_part",
            Facet::ExerciseType => "exercise_type",
            Facet::PrimaryMuscleGroup => "primary_muscle_group",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct values of `facet`, in order of first occurrence.
pub fn distinct_values<'a, I>(exercises: I, facet: Facet) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Exercise>,
{
    let mut seen = HashSet::new();
    exercises
        .into_iter()
        .map(|exercise| facet.value_of(exercise))
        .filter(|value| seen.insert(*value))
        .collect()
}

/// Group exercises by body part. Each group keeps catalog order.
pub fn group_by_body_part<'a, I>(exercises: I) -> BTreeMap<&'a str, Vec<&'a Exercise>>
where
    I: IntoIterator<Item = &'a Exercise>,
{
    let mut groups: BTreeMap<&str, Vec<&Exercise>> = BTreeMap::new();
    for exercise in exercises {
        groups
            .entry(exercise.body_part.as_str())
            .or_default()
            .push(exercise);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: &str, body_part: &str, exercise_type: &str) -> Exercise {
        let mut exercise: Exercise =
            serde_json::from_value(serde_json::json!({ "id": id, "name": id })).unwrap();
        exercise.body_part = body_part.to_string();
        exercise.exercise_type = exercise_type.to_string();
        exercise.primary_muscle_group = format!("{}-muscle", body_part);
        exercise
    }

    #[test]
    fn distinct_values_keep_first_occurrence_order() {
        let records = vec![
            exercise("a", "legs", "strength"),
            exercise("b", "chest", "strength"),
            exercise("c", "legs", "plyometric"),
            exercise("d", "back", "strength"),
        ];
        assert_eq!(
            distinct_values(&records, Facet::BodyPart),
            vec!["legs", "chest", "back"]
        );
        assert_eq!(
            distinct_values(&records, Facet::ExerciseType),
            vec!["strength", "plyometric"]
        );
        assert_eq!(
            distinct_values(&records, Facet::PrimaryMuscleGroup),
            vec!["legs-muscle", "chest-muscle", "back-muscle"]
        );
    }

    #[test]
    fn group_by_body_part_preserves_order_within_groups() {
        let records = vec![
            exercise("a", "legs", "strength"),
            exercise("b", "chest", "strength"),
            exercise("c", "legs", "plyometric"),
        ];
        let groups = group_by_body_part(&records);
        let legs: Vec<&str> = groups["legs"].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(legs, vec!["a", "c"]);
        assert_eq!(groups["chest"].len(), 1);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["chest", "legs"]);
    }

    #[test]
    fn empty_input_has_no_facets() {
        let records: Vec<Exercise> = Vec::new();
        assert!(distinct_values(&records, Facet::BodyPart).is_empty());
        assert!(group_by_body_part(&records).is_empty());
    }

    #[test]
    fn facet_display_matches_field_name() {
        assert_eq!(Facet::PrimaryMuscleGroup.to_string(), "primary_muscle_group");
    }
}
