//! Exercise catalog loading and persistence.
//!
//! The catalog is a JSON array of [`Exercise`] records. It is read once at
//! startup and then only accessed through shared references.

use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::exercise::Exercise;

/// Ordered collection of exercises loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    exercises: Vec<Exercise>,
    source: Option<PathBuf>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(path = %path.display(), "loading exercise catalog");
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file).map_err(|err| match err {
            Error::Decode { source, .. } => Error::Decode {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;
        catalog.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            exercise_count = catalog.len(),
            "exercise catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let exercises: Vec<Exercise> =
            serde_json::from_slice(&data).map_err(|source| Error::Decode { path: None, source })?;

        Self::from_exercises(exercises)
    }

    /// Build a catalog from already decoded exercises, rejecting duplicate ids.
    pub fn from_exercises(exercises: Vec<Exercise>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(exercises.len());
        for exercise in &exercises {
            if !seen.insert(exercise.id.as_str()) {
                return Err(Error::DuplicateExerciseId {
                    id: exercise.id.clone(),
                });
            }
        }

        Ok(Self {
            exercises,
            source: None,
        })
    }

    /// Look up an exercise by id.
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.id == id)
    }

    /// All exercises in catalog order.
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Path the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Write the catalog back to `path` in the on-disk layout.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_exercises(path, &self.exercises)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Exercise;
    type IntoIter = std::slice::Iter<'a, Exercise>;

    fn into_iter(self) -> Self::IntoIter {
        self.exercises.iter()
    }
}

/// Encode `exercises` as a JSON array and overwrite the file at `path`.
///
/// The data is written to a temporary file next to `path` and renamed into
/// place, so readers never observe a partially written catalog.
pub fn save_exercises(path: &Path, exercises: &[Exercise]) -> Result<()> {
    let data = serde_json::to_vec(exercises).map_err(Error::Encode)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|err| err.error)?;

    tracing::debug!(
        path = %path.display(),
        exercise_count = exercises.len(),
        "exercise catalog written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_EXERCISES: &str = r#"[
        {"id": "a", "name": "Alpha"},
        {"id": "b", "name": "Beta"}
    ]"#;

    #[test]
    fn from_reader_keeps_order() {
        let catalog = Catalog::from_reader(TWO_EXERCISES.as_bytes()).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(catalog.source().is_none());
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = Catalog::from_reader(TWO_EXERCISES.as_bytes()).unwrap();
        assert_eq!(catalog.get("b").map(|e| e.name.as_str()), Some("Beta"));
        assert!(catalog.get("c").is_none());
    }

    #[test]
    fn rejects_non_array_json() {
        let err = Catalog::from_reader(r#"{"id":"a"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Decode { path: None, .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[{"id":"a","name":"A"},{"id":"a","name":"Again"}]"#;
        match Catalog::from_reader(json.as_bytes()).unwrap_err() {
            Error::DuplicateExerciseId { id } => assert_eq!(id, "a"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_array_is_a_valid_catalog() {
        let catalog = Catalog::from_reader("[]".as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }
}
