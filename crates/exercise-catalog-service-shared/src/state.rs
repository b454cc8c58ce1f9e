//! Application state for the HTTP service.
//!
//! The catalog is loaded once and shared read-only between all requests; it
//! is passed into router construction explicitly rather than reached through
//! a global.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use exercise_catalog_lib::{Catalog, Error as LibError};

use crate::auth::ProxySecret;
use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Catalog file not found.
    CatalogNotFound(String),

    /// Failed to read or decode the catalog.
    CatalogLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CatalogNotFound(path) => write!(f, "exercise catalog not found: {}", path),
            Self::CatalogLoad(e) => write!(f, "failed to load exercise catalog: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogLoad(e) => Some(e),
            Self::CatalogNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::CatalogNotFound { path } => Self::CatalogNotFound(path.display().to_string()),
            other => Self::CatalogLoad(other),
        }
    }
}

/// Service name reported by the health probes unless overridden.
pub const DEFAULT_SERVICE_NAME: &str = "exercise-catalog";

/// Shared application state for all axum handlers and middleware.
///
/// Cheap to clone; share it via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    proxy_secret: ProxySecret,
    assets_dir: Arc<PathBuf>,
    loaded_at: DateTime<Utc>,
    service_name: &'static str,
    service_version: &'static str,
}

impl AppState {
    /// Load the catalog from `catalog_path`.
    ///
    /// The returned state has no proxy secret configured and serves images
    /// from `assets/`.
    pub fn load(catalog_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let catalog = Catalog::from_path(catalog_path.as_ref())?;
        Ok(Self::from_catalog(catalog))
    }

    /// Load the catalog and apply every setting from `config`.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        Ok(Self::load(&config.catalog_path)?
            .with_proxy_secret(config.proxy_secret.clone())
            .with_assets_dir(&config.assets_dir))
    }

    /// Create state from an already loaded catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            proxy_secret: ProxySecret::unset(),
            assets_dir: Arc::new(PathBuf::from(crate::config::DEFAULT_ASSETS_DIR)),
            loaded_at: Utc::now(),
            service_name: DEFAULT_SERVICE_NAME,
            service_version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn with_proxy_secret(mut self, secret: ProxySecret) -> Self {
        self.proxy_secret = secret;
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Arc::new(dir.into());
        self
    }

    /// Name and version the health probes report.
    pub fn with_service(mut self, name: &'static str, version: &'static str) -> Self {
        self.service_name = name;
        self.service_version = version;
        self
    }

    /// Access the loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog for per-request context.
    pub fn catalog_arc(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn proxy_secret(&self) -> &ProxySecret {
        &self.proxy_secret
    }

    /// Directory that `/images/{name}` serves PNG files from.
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// When the catalog was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    pub fn service_version(&self) -> &'static str {
        self.service_version
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("exercise_count", &self.catalog.len())
            .field("proxy_secret", &self.proxy_secret)
            .field("assets_dir", &self.assets_dir)
            .field("service", &self.service_name)
            .finish()
    }
}
