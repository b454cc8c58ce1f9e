//! Query-string types and validation for HTTP endpoints.
//!
//! Queries are decoded into ordered key/value pairs first so repeated keys
//! (`secondary_muscle_groups=a&secondary_muscle_groups=b`) survive. Single
//! valued parameters use their first occurrence, and an empty single value
//! counts as absent. Secondary muscle groups keep empty values.

use axum::{extract::Query, http::Uri};
use exercise_catalog_lib::{Compound, FilterCriteria, Page};

use crate::ApiError;

/// Validation trait for raw request types.
///
/// Implementations check every field and convert into the typed value the
/// handlers work with, or return an [`ApiError`] for invalid input.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ApiError>;
}

/// Decoded query string, preserving order and repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    /// Decode the query component of `uri`.
    pub fn from_uri(uri: &Uri) -> Result<Self, ApiError> {
        Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| Self(pairs))
            .map_err(|rejection| ApiError::validation(rejection.body_text()))
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in query order.
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Vec<(String, String)>> for QueryPairs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Raw `limit`/`offset` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            limit: pairs.first("limit").map(str::to_owned),
            offset: pairs.first("offset").map(str::to_owned),
        }
    }
}

impl Validate for PageQuery {
    type Output = Page;

    fn validate(self) -> Result<Page, ApiError> {
        let limit = parse_count(self.limit.as_deref(), Page::DEFAULT_LIMIT, "limit")?;
        let offset = parse_count(self.offset.as_deref(), Page::DEFAULT_OFFSET, "offset")?;
        Ok(Page::new(limit, offset))
    }
}

/// Absent or empty ⇒ `default`; anything but a non-negative integer is rejected.
fn parse_count(raw: Option<&str>, default: usize, field: &str) -> Result<usize, ApiError> {
    match raw {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .and_then(|value| usize::try_from(value).ok())
            .ok_or_else(|| ApiError::validation(format!("invalid {}", field))),
    }
}

/// Raw filter parameters for `GET /filter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub name: Option<String>,
    pub body_part: Option<String>,
    pub primary_muscle_group: Option<String>,
    pub secondary_muscle_groups: Vec<String>,
    pub compound: Option<String>,
    pub exercise_type: Option<String>,
}

impl FilterQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        let single = |key: &str| pairs.first(key).filter(|v| !v.is_empty()).map(str::to_owned);
        Self {
            name: single("name"),
            body_part: single("body_part"),
            primary_muscle_group: single("primary_muscle_group"),
            secondary_muscle_groups: pairs
                .all("secondary_muscle_groups")
                .map(str::to_owned)
                .collect(),
            compound: single("compound"),
            exercise_type: single("exercise_type"),
        }
    }
}

impl Validate for FilterQuery {
    type Output = FilterCriteria;

    fn validate(self) -> Result<FilterCriteria, ApiError> {
        Ok(FilterCriteria {
            name: self.name,
            body_part: self.body_part,
            primary_muscle_group: self.primary_muscle_group,
            secondary_muscle_groups: self.secondary_muscle_groups,
            compound: self.compound.as_deref().map(Compound::parse),
            exercise_type: self.exercise_type,
        })
    }
}
