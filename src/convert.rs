//! HEIC/HEIF → JPEG conversion.
//!
//! Phone photos land in the section directories as `.heic`. Browsers cannot
//! show them, so each one gets a full-size `.jpg` sibling:
//!
//! ```text
//! images/boats/launch/IMG_0412.HEIC  →  images/boats/launch/IMG_0412.jpg
//! ```
//!
//! The gallery then prefers the JPEG (see [`crate::gallery`]) and the HEIC
//! original can be kept or removed with `--delete-original`.
//!
//! Existing JPEGs are left alone unless `overwrite` is set, so the job is
//! safe to re-run after adding a few new photos.

use crate::config::{SiteConfig, SitePaths};
use crate::gallery::{self, GalleryManifest};
use crate::imaging::{BackendError, ConvertParams, ImageBackend, Quality};
use crate::manifest::ManifestError;
use crate::scan::{self, AssetCandidate};
use crate::summary::{ItemOutcome, ItemResult, JobReport, SectionReport};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Gallery manifest refresh failed: {0}")]
    Gallery(#[from] ManifestError),
}

/// Options for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Sections to scan, in order.
    pub sections: Vec<String>,
    pub quality: Quality,
    /// Replace JPEGs that already exist.
    pub overwrite: bool,
    /// Remove the HEIC after its JPEG was written.
    pub delete_original: bool,
    /// Report what would be converted without writing anything.
    pub dry_run: bool,
    /// Regenerate the gallery manifest afterwards (ignored in a dry run).
    pub update_gallery: bool,
}

impl ConvertOptions {
    /// Options with every flag off, using the configured sections and quality.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            sections: config.gallery.sections.clone(),
            quality: Quality::new(config.convert.quality),
            overwrite: false,
            delete_original: false,
            dry_run: false,
            update_gallery: false,
        }
    }
}

/// Result of a conversion run.
#[derive(Debug)]
pub struct ConvertRun {
    pub report: JobReport,
    /// The refreshed gallery, when `update_gallery` was requested and ran.
    pub gallery: Option<GalleryManifest>,
}

/// The JPEG written for a HEIC source: same path, `.jpg` extension.
pub fn jpeg_target(source: &Path) -> PathBuf {
    source.with_extension("jpg")
}

/// Convert every HEIC/HEIF file in the requested sections.
///
/// The backend is probed first; an unusable backend aborts before any file
/// is touched. Per-file failures are recorded in the report and do not stop
/// the run. A failing gallery refresh is returned as an error.
pub fn convert_heic(
    backend: &impl ImageBackend,
    config: &SiteConfig,
    paths: &SitePaths,
    options: &ConvertOptions,
) -> Result<ConvertRun, ConvertError> {
    backend.check_available()?;

    let sections = options
        .sections
        .iter()
        .map(|section| convert_section(backend, section, config, paths, options))
        .collect();
    let report = JobReport {
        dry_run: options.dry_run,
        sections,
    };

    let gallery = if options.update_gallery && !options.dry_run {
        Some(gallery::generate_gallery(
            config,
            paths,
            paths.gallery_manifest(),
        )?)
    } else {
        None
    };

    Ok(ConvertRun { report, gallery })
}

/// Convert the HEIC/HEIF files of one section, in scan order.
pub fn convert_section(
    backend: &impl ImageBackend,
    section: &str,
    config: &SiteConfig,
    paths: &SitePaths,
    options: &ConvertOptions,
) -> SectionReport {
    let files = scan::scan_files(&paths.section_dir(section), &config.convert.extensions);
    tracing::debug!(section, files = files.len(), "scanned for HEIC files");

    let items = files
        .iter()
        .map(|file| convert_file(backend, file, paths, options))
        .collect();
    SectionReport {
        section: section.to_string(),
        items,
    }
}

fn convert_file(
    backend: &impl ImageBackend,
    file: &AssetCandidate,
    paths: &SitePaths,
    options: &ConvertOptions,
) -> ItemResult {
    let target = jpeg_target(&file.path);
    let mut result = ItemResult::new(
        paths.site_relative(&file.path),
        paths.site_relative(&target),
        ItemOutcome::Skipped,
    );

    if target.exists() && !options.overwrite {
        return result;
    }
    if options.dry_run {
        result.outcome = ItemOutcome::WouldWrite;
        return result;
    }

    let params = ConvertParams {
        source: file.path.clone(),
        output: target,
        quality: options.quality,
    };
    if let Err(e) = backend.convert(&params) {
        tracing::warn!(source = %result.source, error = %e, "conversion failed");
        result.outcome = ItemOutcome::Failed(e.to_string());
        return result;
    }
    result.outcome = ItemOutcome::Written;

    if options.delete_original {
        match std::fs::remove_file(&file.path) {
            Ok(()) => result.deleted = true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(source = %result.source, error = %e, "could not delete original");
                result.outcome =
                    ItemOutcome::Failed(format!("converted, but deleting the original failed: {e}"));
            }
        }
    }
    result
}
