//! CAD manifest generation.
//!
//! Produces `data/cad.json` from a flat directory of PDF drawings. Related
//! drawings are grouped into one card by a filename heuristic, and each card
//! is emitted with placeholder fields meant to be filled in by hand:
//!
//! ```json
//! [
//!   {
//!     "slug": "keel-bracket",
//!     "title": "Keel Bracket",
//!     "subtitle": "2 drawing file(s)",
//!     "thumb": "assets/placeholders/cad1.svg",
//!     "tags": [],
//!     "drawings": [
//!       { "label": "Keel Bracket   Rev A", "file": "docs/cad/Keel Bracket - Rev A.pdf" },
//!       { "label": "Keel Bracket   Rev B", "file": "docs/cad/Keel Bracket - Rev B.pdf" }
//!     ],
//!     "images": [],
//!     "notes": ""
//!   }
//! ]
//! ```
//!
//! ## Grouping Heuristic
//!
//! The group key comes from the filename with `.pdf` removed:
//!
//! | Filename | Rule | Key |
//! |---|---|---|
//! | `Keel Bracket - Rev B.pdf` | text before the first `" - "` | `Keel Bracket` |
//! | `keel_bracket_v2.pdf` | text before the first `_` | `keel` |
//! | `keel bracket final.pdf` | first two words | `keel bracket` |
//! | `keel.pdf` | whole stem | `keel` |
//!
//! A single-word name with no separator always forms its own group. That is
//! a known limit of the heuristic, kept so existing manifests stay stable.

use crate::config::{SiteConfig, SitePaths};
use crate::manifest::{self, Manifest, ManifestError};
use crate::scan::{self, AssetCandidate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LABEL_MAX_CHARS: usize = 60;
const SLUG_MAX_CHARS: usize = 80;

#[derive(Error, Debug)]
pub enum CadError {
    #[error("Can't find {0}. Put your PDFs there or set paths.cad_dir")]
    MissingDirectory(PathBuf),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// One downloadable drawing on a CAD card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadDrawing {
    pub label: String,
    /// Site-relative path to the PDF.
    pub file: String,
}

/// One card in the CAD section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadItem {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub thumb: String,
    pub tags: Vec<String>,
    pub drawings: Vec<CadDrawing>,
    pub images: Vec<String>,
    pub notes: String,
}

/// Ordered list of CAD cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CadManifest {
    pub items: Vec<CadItem>,
}

impl Manifest for CadManifest {
    fn entry_count(&self) -> usize {
        self.items.len()
    }
}

/// Build CAD cards from the PDFs in `paths.cad_dir`.
pub fn build_cad(config: &SiteConfig, paths: &SitePaths) -> Result<CadManifest, CadError> {
    let cad_dir = paths.cad_dir();
    if !cad_dir.is_dir() {
        return Err(CadError::MissingDirectory(cad_dir.to_path_buf()));
    }

    let pdfs = scan::scan_flat(cad_dir, &["pdf".to_string()]);
    let items = group_drawings(pdfs.iter())
        .into_iter()
        .map(|(key, files)| {
            let drawings: Vec<CadDrawing> = files
                .iter()
                .map(|pdf| CadDrawing {
                    label: drawing_label(&pdf.path),
                    file: paths.site_relative(&pdf.path),
                })
                .collect();
            CadItem {
                slug: slugify(&key),
                subtitle: format!("{} drawing file(s)", drawings.len()),
                title: key,
                thumb: config.cad.placeholder_thumb.clone(),
                tags: Vec::new(),
                drawings,
                images: Vec::new(),
                notes: String::new(),
            }
        })
        .collect();

    Ok(CadManifest { items })
}

/// Build and write the CAD manifest to `output`.
pub fn generate_cad(
    config: &SiteConfig,
    paths: &SitePaths,
    output: &Path,
) -> Result<CadManifest, CadError> {
    let cad = build_cad(config, paths)?;
    manifest::write_manifest(output, &cad)?;
    Ok(cad)
}

/// Bucket files by [`group_key`], ordered by lowercased key.
///
/// Files keep their input order within a bucket. Keys that differ only in
/// case stay separate buckets, in first-seen order.
pub fn group_drawings<'a>(
    files: impl IntoIterator<Item = &'a AssetCandidate>,
) -> Vec<(String, Vec<&'a AssetCandidate>)> {
    let mut buckets: IndexMap<String, Vec<&AssetCandidate>> = IndexMap::new();
    for file in files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        buckets.entry(group_key(&name)).or_default().push(file);
    }

    let mut groups: Vec<_> = buckets.into_iter().collect();
    // Stable, so equal lowercased keys keep first-seen order
    groups.sort_by_cached_key(|(key, _)| key.to_lowercase());
    groups
}

/// Derive the group key from a PDF filename.
pub fn group_key(filename: &str) -> String {
    let stem = strip_pdf_suffix(filename).trim();
    if let Some((head, _)) = stem.split_once(" - ") {
        return head.trim().to_string();
    }
    if let Some((head, _)) = stem.split_once('_') {
        return head.trim().to_string();
    }
    let words: Vec<&str> = stem.split_whitespace().collect();
    if words.len() >= 2 {
        words[..2].join(" ")
    } else {
        stem.to_string()
    }
}

fn strip_pdf_suffix(filename: &str) -> &str {
    let cut = filename.len().saturating_sub(4);
    match filename.get(cut..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(".pdf") => &filename[..cut],
        _ => filename,
    }
}

/// Display label for a drawing: stem with `_`/`-` as spaces, max 60 chars.
pub fn drawing_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let label: String = stem
        .replace(['_', '-'], " ")
        .trim()
        .chars()
        .take(LABEL_MAX_CHARS)
        .collect();
    if label.is_empty() {
        "PDF".to_string()
    } else {
        label
    }
}

/// URL slug for a group key.
///
/// Lowercased, every run of characters outside `[a-z0-9]` collapsed to one
/// `-`, no leading or trailing `-`, at most 80 characters.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    // ASCII only at this point, so byte length is char count
    slug.truncate(SLUG_MAX_CHARS);
    if slug.is_empty() {
        "cad-item".to_string()
    } else {
        slug
    }
}
