//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use exercise_catalog_lib::Catalog;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the fixture exercise catalog.
#[allow(dead_code)]
pub fn fixture_catalog_path() -> PathBuf {
    fixtures_dir().join("exercises.json")
}

/// Load the fixture catalog, panicking on failure.
pub fn fixture_catalog() -> Catalog {
    Catalog::from_path(&fixture_catalog_path()).expect("fixture catalog should load")
}
