//! Predicate matching over catalog records.
//!
//! Every supplied criterion must match (AND semantics). An absent or empty
//! criterion always passes, so the default [`FilterCriteria`] selects
//! everything.

use crate::exercise::Exercise;

/// Requested value of the `compound` flag.
///
/// Only the literals `true` and `false` name a flag value. Anything else is
/// kept as [`Compound::Other`], which no exercise matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compound {
    Yes,
    No,
    Other,
}

impl Compound {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => Self::Yes,
            "false" => Self::No,
            _ => Self::Other,
        }
    }

    pub fn matches(self, compound: bool) -> bool {
        match self {
            Self::Yes => compound,
            Self::No => !compound,
            Self::Other => false,
        }
    }
}

/// Optional match conditions applied to each exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the exercise name.
    pub name: Option<String>,
    /// Exact body part.
    pub body_part: Option<String>,
    /// Exact primary muscle group.
    pub primary_muscle_group: Option<String>,
    /// Every listed group must appear among the secondary muscle groups.
    pub secondary_muscle_groups: Vec<String>,
    pub compound: Option<Compound>,
    /// Exact exercise type.
    pub exercise_type: Option<String>,
}

impl FilterCriteria {
    /// True when no criterion would reject anything.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of criteria that take part in matching.
    pub fn active_count(&self) -> usize {
        [
            &self.name,
            &self.body_part,
            &self.primary_muscle_group,
            &self.exercise_type,
        ]
        .into_iter()
        .filter(|value| is_set(value))
        .count()
            + usize::from(!self.secondary_muscle_groups.is_empty())
            + usize::from(self.compound.is_some())
    }

    /// Whether `exercise` satisfies all supplied criteria.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        self.name_matches(exercise)
            && exact(&self.body_part, &exercise.body_part)
            && exact(&self.primary_muscle_group, &exercise.primary_muscle_group)
            && self
                .secondary_muscle_groups
                .iter()
                .all(|group| exercise.works_secondary(group))
            && self.compound.map_or(true, |c| c.matches(exercise.compound))
            && exact(&self.exercise_type, &exercise.exercise_type)
    }

    fn name_matches(&self, exercise: &Exercise) -> bool {
        match self.name.as_deref() {
            None | Some("") => true,
            Some(needle) => exercise
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn exact(criterion: &Option<String>, value: &str) -> bool {
    match criterion.as_deref() {
        None | Some("") => true,
        Some(expected) => expected == value,
    }
}

/// Return the exercises matching `criteria`, preserving input order.
pub fn filter_exercises<'a, I>(exercises: I, criteria: &FilterCriteria) -> Vec<&'a Exercise>
where
    I: IntoIterator<Item = &'a Exercise>,
{
    exercises
        .into_iter()
        .filter(|exercise| criteria.matches(exercise))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: &str, name: &str, compound: bool, secondary: &[&str]) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            directions: Vec::new(),
            cues: Vec::new(),
            image_url: String::new(),
            video_url: String::new(),
            body_part: "legs".to_string(),
            primary_muscle_group: "quadriceps".to_string(),
            secondary_muscle_groups: secondary.iter().map(|s| s.to_string()).collect(),
            compound,
            exercise_type: "strength".to_string(),
            general_best_rep_range: Default::default(),
        }
    }

    #[test]
    fn empty_criteria_match_everything() {
        let records = vec![
            exercise("a", "Back Squat", true, &[]),
            exercise("b", "Leg Extension", false, &[]),
        ];
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(filter_exercises(&records, &criteria).len(), 2);
    }

    #[test]
    fn name_is_case_insensitive_substring() {
        let records = vec![
            exercise("a", "Back Squat", true, &[]),
            exercise("b", "Leg Extension", false, &[]),
        ];
        let criteria = FilterCriteria {
            name: Some("SQU".to_string()),
            ..Default::default()
        };
        let ids: Vec<&str> = filter_exercises(&records, &criteria)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn exact_fields_are_case_sensitive() {
        let records = vec![exercise("a", "Back Squat", true, &[])];
        let criteria = FilterCriteria {
            body_part: Some("Legs".to_string()),
            ..Default::default()
        };
        assert!(filter_exercises(&records, &criteria).is_empty());
    }

    #[test]
    fn empty_string_criteria_pass() {
        let records = vec![exercise("a", "Back Squat", true, &[])];
        let criteria = FilterCriteria {
            name: Some(String::new()),
            exercise_type: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(filter_exercises(&records, &criteria).len(), 1);
    }

    #[test]
    fn secondary_groups_require_all_listed() {
        let records = vec![
            exercise("a", "Back Squat", true, &["glutes", "hamstrings"]),
            exercise("b", "Front Squat", true, &["glutes"]),
        ];
        let criteria = FilterCriteria {
            secondary_muscle_groups: vec!["hamstrings".to_string(), "glutes".to_string()],
            ..Default::default()
        };
        let ids: Vec<&str> = filter_exercises(&records, &criteria)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn compound_matches_boolean() {
        let records = vec![
            exercise("a", "Back Squat", true, &[]),
            exercise("b", "Leg Extension", false, &[]),
        ];
        let isolation = FilterCriteria {
            compound: Some(Compound::No),
            ..Default::default()
        };
        let ids: Vec<&str> = filter_exercises(&records, &isolation)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn compound_parses_only_lowercase_literals() {
        assert_eq!(Compound::parse("true"), Compound::Yes);
        assert_eq!(Compound::parse("false"), Compound::No);
        assert_eq!(Compound::parse("TRUE"), Compound::Other);
        assert_eq!(Compound::parse("maybe"), Compound::Other);
    }

    #[test]
    fn unrecognized_compound_matches_nothing() {
        let records = vec![
            exercise("a", "Back Squat", true, &[]),
            exercise("b", "Leg Extension", false, &[]),
        ];
        let criteria = FilterCriteria {
            compound: Some(Compound::Other),
            ..Default::default()
        };
        assert!(!criteria.is_empty());
        assert!(filter_exercises(&records, &criteria).is_empty());
    }

    #[test]
    fn empty_secondary_group_matches_nothing() {
        let records = vec![exercise("a", "Back Squat", true, &["glutes"])];
        let criteria = FilterCriteria {
            secondary_muscle_groups: vec![String::new()],
            ..Default::default()
        };
        assert!(filter_exercises(&records, &criteria).is_empty());
    }

    #[test]
    fn active_count_tracks_supplied_criteria() {
        let criteria = FilterCriteria {
            name: Some("squat".to_string()),
            secondary_muscle_groups: vec!["glutes".to_string()],
            compound: Some(Compound::Yes),
            ..Default::default()
        };
        assert_eq!(criteria.active_count(), 3);
    }
}
