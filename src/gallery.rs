//! Gallery manifest generation.
//!
//! Produces `data/gallery.json`, the list of images the site frontend shows
//! for each section:
//!
//! ```json
//! {
//!   "projects": [
//!     { "src": "images/projects/deck.jpg", "thumb": "images/_thumbs/projects/deck.jpg" }
//!   ],
//!   "boats": [],
//!   "fabrication": []
//! }
//! ```
//!
//! ## One Entry Per Asset
//!
//! The same photo often exists in several formats, typically an original
//! `.heic` next to the `.jpg` made by `convert-heic`. Files are grouped by
//! their section-relative path without extension (case-insensitive) and each
//! group contributes a single entry: the file whose extension comes first in
//! `gallery.preferred_extensions`.
//!
//! ## Thumbnails
//!
//! The thumbnail for `images/<section>/<path>.<ext>` is expected at
//! `images/_thumbs/<section>/<path>.jpg`. When it has not been generated yet
//! the entry's `thumb` is simply its `src`; the frontend then loads the full
//! image, which is slower but correct.

use crate::config::{SiteConfig, SitePaths};
use crate::manifest::{self, Manifest, ManifestError};
use crate::scan::{self, AssetCandidate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A single image shown by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    /// Site-relative path of the chosen source image.
    pub src: String,
    /// Site-relative path of its thumbnail, or `src` when none exists.
    pub thumb: String,
}

/// Section name → entries, in configured section order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryManifest {
    pub sections: IndexMap<String, Vec<GalleryEntry>>,
}

impl Manifest for GalleryManifest {
    fn entry_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }
}

/// Build the gallery manifest for every configured section.
pub fn build_gallery(config: &SiteConfig, paths: &SitePaths) -> GalleryManifest {
    let sections = config
        .gallery
        .sections
        .iter()
        .map(|section| (section.clone(), list_section(section, config, paths)))
        .collect();
    GalleryManifest { sections }
}

/// Build and write the gallery manifest to `output`.
pub fn generate_gallery(
    config: &SiteConfig,
    paths: &SitePaths,
    output: &Path,
) -> Result<GalleryManifest, ManifestError> {
    let gallery = build_gallery(config, paths);
    manifest::write_manifest(output, &gallery)?;
    Ok(gallery)
}

/// List the entries of one section, ordered by group key.
///
/// A section without a directory has no entries.
pub fn list_section(section: &str, config: &SiteConfig, paths: &SitePaths) -> Vec<GalleryEntry> {
    let preference = &config.gallery.preferred_extensions;
    let files = scan::scan_files(&paths.section_dir(section), preference);

    group_by_key(files.iter())
        .into_values()
        .filter_map(|options| choose_representative(&options, preference))
        .map(|chosen| {
            let src = paths.site_relative(&chosen.path);
            let thumb_path = paths.thumbnail_for(section, &chosen.relative);
            let thumb = if thumb_path.is_file() {
                paths.site_relative(&thumb_path)
            } else {
                src.clone()
            };
            GalleryEntry { src, thumb }
        })
        .collect()
}

/// Group candidates by key, keeping one candidate per extension.
///
/// When two files share both key and extension (`A.jpg` and `a.jpg`), the
/// later one in scan order wins.
pub fn group_by_key<'a>(
    files: impl IntoIterator<Item = &'a AssetCandidate>,
) -> BTreeMap<String, HashMap<String, &'a AssetCandidate>> {
    let mut groups: BTreeMap<String, HashMap<String, &AssetCandidate>> = BTreeMap::new();
    for file in files {
        groups
            .entry(file.group_key())
            .or_default()
            .insert(file.extension.clone(), file);
    }
    groups
}

/// Pick the candidate whose extension comes first in `preference`.
pub fn choose_representative<'a>(
    options: &HashMap<String, &'a AssetCandidate>,
    preference: &[String],
) -> Option<&'a AssetCandidate> {
    preference.iter().find_map(|ext| options.get(ext).copied())
}
