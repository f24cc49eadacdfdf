//! Shared test utilities for the site-assets test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = TestSite::new();
//! site.touch("images/projects/a.heic");
//! create_test_jpeg(&site.path("images/projects/b.jpg"), 800, 600);
//!
//! let gallery = build_gallery(&site.config, &site.paths());
//! ```

use crate::config::{SiteConfig, SitePaths};
use image::{ImageEncoder, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// A throwaway site root with the stock configuration.
///
/// `config` is public so tests can tweak sections or extensions before
/// calling [`TestSite::paths`].
pub struct TestSite {
    tmp: TempDir,
    pub config: SiteConfig,
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
            config: SiteConfig::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Resolve the current `config.paths` against the site root.
    pub fn paths(&self) -> SitePaths {
        SitePaths::new(self.root(), &self.config.paths)
    }

    /// Absolute path of a site-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Create an empty file (and its parent directories).
    pub fn touch(&self, rel: &str) {
        touch(&self.path(rel));
    }

    pub fn mkdir(&self, rel: &str) {
        std::fs::create_dir_all(self.path(rel)).unwrap();
    }
}

/// Create an empty file at `path`, creating parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

/// Owned extension list from string literals.
pub fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|e| e.to_string()).collect()
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}
