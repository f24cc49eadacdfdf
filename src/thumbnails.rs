//! Gallery thumbnail generation.
//!
//! Every source image in a section gets a small JPEG in a mirrored tree
//! under the thumbnails directory:
//!
//! ```text
//! images/projects/deck/stairs.png  →  images/_thumbs/projects/deck/stairs.jpg
//! ```
//!
//! Thumbnails are shrunk to fit a `max_size` square with the aspect ratio
//! kept; small images are re-encoded at their own size, never enlarged.
//! This is the path [`crate::gallery`] looks for when filling in `thumb`.

use crate::config::{SiteConfig, SitePaths};
use crate::imaging::{ImageBackend, MaxEdge, Quality, ThumbnailParams};
use crate::scan::{self, AssetCandidate};
use crate::summary::{ItemOutcome, ItemResult, JobReport, SectionReport};

/// Options for one thumbnail run.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOptions {
    /// Sections to scan, in order.
    pub sections: Vec<String>,
    pub max_edge: MaxEdge,
    pub quality: Quality,
    /// Regenerate thumbnails that already exist.
    pub overwrite: bool,
    /// Report what would be generated without writing anything.
    pub dry_run: bool,
}

impl ThumbnailOptions {
    /// Options with every flag off, using the configured sections and sizes.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            sections: config.gallery.sections.clone(),
            max_edge: MaxEdge::new(config.thumbnails.max_size),
            quality: Quality::new(config.thumbnails.quality),
            overwrite: false,
            dry_run: false,
        }
    }
}

/// Generate thumbnails for every requested section.
pub fn generate_thumbnails(
    backend: &impl ImageBackend,
    config: &SiteConfig,
    paths: &SitePaths,
    options: &ThumbnailOptions,
) -> JobReport {
    let sections = options
        .sections
        .iter()
        .map(|section| thumbnail_section(backend, section, config, paths, options))
        .collect();
    JobReport {
        dry_run: options.dry_run,
        sections,
    }
}

/// Generate thumbnails for one section, in scan order.
pub fn thumbnail_section(
    backend: &impl ImageBackend,
    section: &str,
    config: &SiteConfig,
    paths: &SitePaths,
    options: &ThumbnailOptions,
) -> SectionReport {
    let files = scan::scan_files(&paths.section_dir(section), &config.thumbnails.extensions);
    tracing::debug!(section, files = files.len(), "scanned for thumbnail sources");

    let items = files
        .iter()
        .map(|file| thumbnail_file(backend, section, file, paths, options))
        .collect();
    SectionReport {
        section: section.to_string(),
        items,
    }
}

fn thumbnail_file(
    backend: &impl ImageBackend,
    section: &str,
    file: &AssetCandidate,
    paths: &SitePaths,
    options: &ThumbnailOptions,
) -> ItemResult {
    let target = paths.thumbnail_for(section, &file.relative);
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

    if let Some(parent) = target.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        tracing::warn!(path = %result.target, error = %e, "could not create thumbnail directory");
        result.outcome = ItemOutcome::Failed(e.to_string());
        return result;
    }

    let params = ThumbnailParams {
        source: file.path.clone(),
        output: target,
        max_edge: options.max_edge,
        quality: options.quality,
    };
    result.outcome = match backend.thumbnail(&params) {
        Ok(()) => ItemOutcome::Written,
        Err(e) => {
            tracing::warn!(source = %result.source, error = %e, "thumbnail failed");
            ItemOutcome::Failed(e.to_string())
        }
    };
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{TestSite, create_test_jpeg};

    fn options(site: &TestSite) -> ThumbnailOptions {
        ThumbnailOptions::from_config(&site.config)
    }

    #[test]
    fn mirrors_section_tree_with_jpg_extension() {
        let site = TestSite::new();
        site.touch("images/projects/deck/stairs.png");
        site.touch("images/boats/hull.webp");
        let backend = MockBackend::new();

        let report = generate_thumbnails(&backend, &site.config, &site.paths(), &options(&site));

        assert_eq!(report.summary().written, 2);
        assert!(site.path("images/_thumbs/projects/deck/stairs.jpg").is_file());
        assert!(site.path("images/_thumbs/boats/hull.jpg").is_file());
        assert_eq!(
            report.sections[0].items[0].target,
            "images/_thumbs/projects/deck/stairs.jpg"
        );
    }

    #[test]
    fn passes_size_and_quality_to_backend() {
        let site = TestSite::new();
        site.touch("images/projects/a.jpg");
        let backend = MockBackend::new();
        let mut opts = options(&site);
        opts.max_edge = MaxEdge::new(50);
        opts.quality = Quality::new(0);

        generate_thumbnails(&backend, &site.config, &site.paths(), &opts);

        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Thumbnail {
                max_edge: 200,
                quality: 1,
                ..
            }
        ));
    }

    #[test]
    fn ignores_heic_and_other_files() {
        let site = TestSite::new();
        site.touch("images/projects/a.heic");
        site.touch("images/projects/readme.txt");
        let backend = MockBackend::new();

        let report = generate_thumbnails(&backend, &site.config, &site.paths(), &options(&site));

        assert!(report.items().next().is_none());
    }

    #[test]
    fn existing_thumbnail_skipped_unless_overwrite() {
        let site = TestSite::new();
        site.touch("images/projects/a.jpg");
        site.touch("images/_thumbs/projects/a.jpg");
        let backend = MockBackend::new();

        let report = generate_thumbnails(&backend, &site.config, &site.paths(), &options(&site));
        assert_eq!(report.summary().skipped, 1);
        assert!(backend.get_operations().is_empty());

        let mut opts = options(&site);
        opts.overwrite = true;
        let report = generate_thumbnails(&backend, &site.config, &site.paths(), &opts);
        assert_eq!(report.summary().written, 1);
    }

    #[test]
    fn dry_run_creates_no_directories() {
        let site = TestSite::new();
        site.touch("images/projects/deep/a.jpg");
        let backend = MockBackend::new();
        let mut opts = options(&site);
        opts.dry_run = true;

        let report = generate_thumbnails(&backend, &site.config, &site.paths(), &opts);

        assert_eq!(report.sections[0].items[0].outcome, ItemOutcome::WouldWrite);
        assert!(!site.path("images/_thumbs").exists());
    }

    #[test]
    fn failures_counted_and_processing_continues() {
        let site = TestSite::new();
        site.touch("images/projects/a.svg");
        site.touch("images/projects/b.jpg");
        let backend = MockBackend::failing_on(&["a.svg"]);

        let report = generate_thumbnails(&backend, &site.config, &site.paths(), &options(&site));

        let summary = report.summary();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.exit_code(), 2);
    }

    #[test]
    fn rust_backend_end_to_end() {
        let site = TestSite::new();
        create_test_jpeg(&site.path("images/boats/big.jpg"), 1600, 1200);
        create_test_jpeg(&site.path("images/boats/small.jpg"), 300, 100);
        let mut opts = options(&site);
        opts.max_edge = MaxEdge::new(400);

        let report = generate_thumbnails(&RustBackend::new(), &site.config, &site.paths(), &opts);

        assert_eq!(report.summary().written, 2);
        assert_eq!(
            image::image_dimensions(site.path("images/_thumbs/boats/big.jpg")).unwrap(),
            (400, 300)
        );
        assert_eq!(
            image::image_dimensions(site.path("images/_thumbs/boats/small.jpg")).unwrap(),
            (300, 100)
        );
    }
}
