//! Service configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `EXERCISES_PATH` | `exercises.json` |
//! | `PORT` | `8080` |
//! | `X_RAPIDAPI_PROXY_SECRET` | unset (all requests rejected) |
//! | `ASSETS_DIR` | `assets` |

use std::path::PathBuf;

use crate::auth::{ProxySecret, PROXY_SECRET_ENV};

pub const DEFAULT_CATALOG_PATH: &str = "exercises.json";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Startup settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub catalog_path: PathBuf,
    pub port: u16,
    pub proxy_secret: ProxySecret,
    pub assets_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            port: DEFAULT_PORT,
            proxy_secret: ProxySecret::unset(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. An unparseable `PORT` falls back
    /// to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            catalog_path: get("EXERCISES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            proxy_secret: get(PROXY_SECRET_ENV)
                .map(ProxySecret::new)
                .unwrap_or(defaults.proxy_secret),
            assets_dir: get("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
        }
    }
}
