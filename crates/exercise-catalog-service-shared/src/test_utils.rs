//! Test utilities for handler testing.
//!
//! Provides the fixture catalog, its image directory, and a ready-made
//! [`AppState`] configured with [`TEST_PROXY_SECRET`].

use std::path::PathBuf;
use std::sync::OnceLock;

use exercise_catalog_lib::Catalog;

use crate::auth::ProxySecret;
use crate::state::AppState;

/// Path to the fixture exercise catalog.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/exercises.json"
);

/// Directory holding fixture images.
pub const TEST_ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures/assets");

/// Proxy secret configured on [`test_state`].
pub const TEST_PROXY_SECRET: &str = "test-proxy-secret";

static TEST_CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The fixture catalog, loaded once per test binary.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded. This indicates a test
/// configuration issue.
pub fn test_catalog() -> Catalog {
    TEST_CATALOG
        .get_or_init(|| {
            let path = PathBuf::from(TEST_FIXTURE_PATH);
            Catalog::from_path(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

/// State over the fixture catalog with the test secret and fixture assets.
pub fn test_state() -> AppState {
    AppState::from_catalog(test_catalog())
        .with_proxy_secret(ProxySecret::new(TEST_PROXY_SECRET))
        .with_assets_dir(TEST_ASSETS_DIR)
}

/// Fixture exercise ids, in catalog order.
pub mod fixture_exercises {
    pub const BACK_SQUAT: &str = "barbell-back-squat";
    pub const BENCH_PRESS: &str = "bench-press";
    pub const LEG_EXTENSION: &str = "leg-extension";
    pub const PULL_UP: &str = "pull-up";
    pub const BOX_JUMP: &str = "box-jump";
    pub const CABLE_FLY: &str = "cable-fly";

    /// Every fixture id in catalog order.
    pub const ALL: [&str; 6] = [
        BACK_SQUAT,
        BENCH_PRESS,
        LEG_EXTENSION,
        PULL_UP,
        BOX_JUMP,
        CABLE_FLY,
    ];
}
