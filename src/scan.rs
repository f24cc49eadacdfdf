//! Directory scanning.
//!
//! Every job starts the same way: list the files under a directory whose
//! extension is in an accepted set, in a stable order. [`scan_files`] walks
//! recursively (gallery sections, thumbnails, HEIC conversion) and
//! [`scan_flat`] looks at a single level (the CAD drawings directory).
//!
//! ## Ordering
//!
//! Results are sorted by the lowercased `/`-separated path relative to the
//! scanned root, with the original-case path as a tie-breaker. Output built
//! from a scan is therefore identical between runs over the same tree and
//! across platforms.
//!
//! ## Missing Directories
//!
//! A root that does not exist (or is not a directory) produces an empty
//! [`AssetScan`]. Callers treat that as "nothing to do", never as an error.

use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A file discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCandidate {
    /// Full path (scan root joined with `relative`).
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative: PathBuf,
    /// Lowercased extension, without the dot.
    pub extension: String,
}

impl AssetCandidate {
    /// Relative path with `/` separators.
    pub fn relative_posix(&self) -> String {
        to_posix(&self.relative)
    }

    /// Relative path with the extension removed, lowercased.
    ///
    /// Two candidates with the same key are the same logical asset in
    /// different formats: `Deck.PNG` and `deck.jpg` both key to `deck`.
    pub fn group_key(&self) -> String {
        to_posix(&self.relative.with_extension("")).to_lowercase()
    }
}

/// Sorted result of a directory scan.
///
/// Iterating does not touch the filesystem, so a scan can be walked as many
/// times as needed.
#[derive(Debug, Clone, Default)]
pub struct AssetScan {
    files: Vec<AssetCandidate>,
}

impl AssetScan {
    pub fn iter(&self) -> std::slice::Iter<'_, AssetCandidate> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'a> IntoIterator for &'a AssetScan {
    type Item = &'a AssetCandidate;
    type IntoIter = std::slice::Iter<'a, AssetCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl IntoIterator for AssetScan {
    type Item = AssetCandidate;
    type IntoIter = std::vec::IntoIter<AssetCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// Recursively list files under `root` whose extension is in `extensions`.
///
/// Extensions are compared case-insensitively and given without the dot.
pub fn scan_files(root: &Path, extensions: &[String]) -> AssetScan {
    walk(root, extensions, None)
}

/// List files directly inside `root` (no recursion).
pub fn scan_flat(root: &Path, extensions: &[String]) -> AssetScan {
    walk(root, extensions, Some(1))
}

fn walk(root: &Path, extensions: &[String], max_depth: Option<usize>) -> AssetScan {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "scan root missing, nothing to do");
        return AssetScan::default();
    }

    let mut walker = WalkDir::new(root).min_depth(1);
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files: Vec<AssetCandidate> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        // `Path::is_file` follows symlinks, so linked files are included
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let extension = e.path().extension()?.to_string_lossy().to_lowercase();
            if !extensions.iter().any(|accepted| *accepted == extension) {
                return None;
            }
            let relative = e.path().strip_prefix(root).ok()?.to_path_buf();
            Some(AssetCandidate {
                path: e.into_path(),
                relative,
                extension,
            })
        })
        .collect();

    files.sort_by_cached_key(|c| {
        let posix = c.relative_posix();
        (posix.to_lowercase(), posix)
    });

    AssetScan { files }
}

/// Render a path with `/` separators regardless of host conventions.
pub fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Render `path` relative to `base` with `/` separators.
///
/// Falls back to the whole path when it is not under `base`.
pub fn relative_posix(base: &Path, path: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) => to_posix(relative),
        Err(_) => to_posix(path),
    }
}
