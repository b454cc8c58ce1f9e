use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the exercise catalog library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog file could not be located at the given path.
    #[error("exercise catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    /// Raised when the catalog contents are not a JSON array of exercises.
    #[error("failed to decode exercise catalog{}: {source}", format_path(.path))]
    Decode {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when exercises cannot be encoded for writing.
    #[error("failed to encode exercise catalog: {0}")]
    Encode(#[source] serde_json::Error),

    /// Raised when two records in one catalog share an id.
    #[error("duplicate exercise id encountered: {id}")]
    DuplicateExerciseId { id: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}
