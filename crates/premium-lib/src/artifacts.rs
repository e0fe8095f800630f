//! Artifact directory for persisted models
//!
//! Model persistence lives outside this crate. The only guarantee given
//! here is that the directory exists once an [`ArtifactStore`] is opened.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact directory, relative to the working directory
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Handle to an existing artifact directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    created: bool,
}

impl ArtifactStore {
    /// Ensure `dir` exists, creating it and any parents if absent
    ///
    /// An existing directory is accepted as is.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let root = dir.into();

        if root.exists() && !root.is_dir() {
            bail!("Artifact path {:?} exists but is not a directory", root);
        }

        let created = !root.exists();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create artifact directory {:?}", root))?;

        debug!(path = %root.display(), created, "Artifact directory ensured");
        Ok(Self { root, created })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether this call created the directory
    pub fn created(&self) -> bool {
        self.created
    }

    /// Location of a named artifact inside the directory
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("artifacts");

        let store = ArtifactStore::open(&dir).unwrap();

        assert!(dir.is_dir());
        assert!(store.created());
        assert_eq!(store.root(), dir.as_path());
    }

    #[test]
    fn test_existing_directory_is_success() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("artifacts");

        ArtifactStore::open(&dir).unwrap();
        fs::write(dir.join("base_model.bin"), b"weights").unwrap();
        let store = ArtifactStore::open(&dir).unwrap();

        assert!(!store.created());
        assert!(store.path_for("base_model.bin").exists());
    }

    #[test]
    fn test_creates_nested_parents() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("runs").join("2026").join("artifacts");

        ArtifactStore::open(&dir).unwrap();

        assert!(dir.is_dir());
    }

    #[test]
    fn test_file_in_the_way_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifacts");
        fs::write(&path, b"not a directory").unwrap();

        let err = ArtifactStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_path_for_joins_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        assert_eq!(
            store.path_for("residual_model.json"),
            temp_dir.path().join("residual_model.json")
        );
    }
}
