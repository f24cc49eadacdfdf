//! JSON manifest writing.
//!
//! Both manifests are written the same way: pretty-printed JSON with a
//! two-space indent, parent directories created on demand, and any previous
//! file replaced wholesale. There is no merge with the old contents; the
//! manifest on disk always describes exactly what the last scan found.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to write manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A manifest that can say how many entries it holds.
pub trait Manifest: Serialize {
    /// Number of entries written (gallery images across all sections, or CAD items).
    fn entry_count(&self) -> usize;
}

/// Serialize `manifest` to `path`, replacing any existing file.
///
/// Returns the number of entries written.
pub fn write_manifest<M: Manifest>(path: &Path, manifest: &M) -> Result<usize, ManifestError> {
    let json = serde_json::to_string_pretty(manifest)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entries = manifest.entry_count(), "manifest written");
    Ok(manifest.entry_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Serialize)]
    #[serde(transparent)]
    struct Names(Vec<&'static str>);

    impl Manifest for Names {
        fn entry_count(&self) -> usize {
            self.0.len()
        }
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data/nested/out.json");

        let count = write_manifest(&path, &Names(vec!["a", "b"])).unwrap();
        assert_eq!(count, 2);
        assert!(path.exists());
    }

    #[test]
    fn uses_two_space_indent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");

        write_manifest(&path, &Names(vec!["a"])).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  \"a\"\n]");
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        std::fs::write(&path, "[\"stale\", \"entries\", \"here\"]").unwrap();

        write_manifest(&path, &Names(vec![])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn unwritable_destination_is_error() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        std::fs::write(tmp.path().join("data"), "not a directory").unwrap();
        let path = tmp.path().join("data/out.json");

        let result = write_manifest(&path, &Names(vec!["a"]));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }

    #[test]
    fn non_ascii_written_as_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");

        write_manifest(&path, &Names(vec!["images/boats/Tårnby café.jpg"])).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  \"images/boats/Tårnby café.jpg\"\n]");
        assert!(!content.contains("\\u"));

        let parsed: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec!["images/boats/Tårnby café.jpg"]);
    }
}
