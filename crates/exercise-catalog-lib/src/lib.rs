//! Exercise catalog library entry points.
//!
//! This crate loads the exercise catalog into memory and provides the pure
//! operations the HTTP service composes: filtering, cyclic-window pagination,
//! and facet enumeration. Higher-level consumers should depend on the
//! functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod catalog;
pub mod error;
pub mod exercise;
pub mod facets;
pub mod filter;
pub mod pagination;

pub use catalog::{save_exercises, Catalog};
pub use error::{Error, Result};
pub use exercise::{Exercise, ExerciseId, RepRange};
pub use facets::{distinct_values, group_by_body_part, Facet};
pub use filter::{filter_exercises, Compound, FilterCriteria};
pub use pagination::{paginate, Page};
