//! Site configuration.
//!
//! Every job takes an explicit [`SiteConfig`] instead of reading module-level
//! constants. The config is loaded from `site-assets.toml` in the site root
//! (or a file passed with `--config`) and layered on top of the stock
//! defaults, so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! images_dir = "images"              # Section directories live here
//! thumbs_dir = "images/_thumbs"      # Mirrored thumbnail tree
//! cad_dir = "docs/cad"               # Flat directory of CAD PDFs
//! gallery_manifest = "data/gallery.json"
//! cad_manifest = "data/cad.json"
//!
//! [gallery]
//! sections = ["projects", "boats", "fabrication"]
//! preferred_extensions = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "svg", "heic", "heif"]
//!
//! [cad]
//! placeholder_thumb = "assets/placeholders/cad1.svg"
//!
//! [thumbnails]
//! max_size = 720                     # Longest edge in pixels (200-2000)
//! quality = 82                       # JPEG quality (1-100)
//! extensions = ["jpg", "jpeg", "png", "webp", "bmp", "gif", "svg"]
//!
//! [convert]
//! quality = 92                       # JPEG quality (1-100)
//! extensions = ["heic", "heif"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Paths
//!
//! All configured paths are relative to the site root and written with `/`.
//! [`SitePaths`] resolves them against the root once and answers the
//! path questions every job asks (where a section lives, where its
//! thumbnail goes, what a file's site-relative name is).

use crate::imaging::{MaxEdge, Quality};
use crate::scan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILENAME: &str = "site-assets.toml";

const QUALITY_RANGE: (u32, u32) = (Quality::MIN, Quality::MAX);
const MAX_SIZE_RANGE: (u32, u32) = (MaxEdge::MIN, MaxEdge::MAX);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration for all asset jobs.
///
/// All fields have defaults matching the site layout the tools were written
/// for. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where things live, relative to the site root.
    pub paths: PathsConfig,
    /// Gallery manifest settings (sections, format preference).
    pub gallery: GalleryConfig,
    /// CAD manifest settings.
    pub cad: CadConfig,
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
    /// HEIC → JPEG conversion settings.
    pub convert: ConvertConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.sections.is_empty() {
            return Err(ConfigError::Validation(
                "gallery.sections must not be empty".into(),
            ));
        }
        for section in &self.gallery.sections {
            if section.is_empty() || section.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "gallery.sections entry {section:?} must be a single directory name"
                )));
            }
        }
        validate_extensions("gallery.preferred_extensions", &self.gallery.preferred_extensions)?;
        validate_extensions("thumbnails.extensions", &self.thumbnails.extensions)?;
        validate_extensions("convert.extensions", &self.convert.extensions)?;
        validate_range("thumbnails.quality", self.thumbnails.quality, QUALITY_RANGE)?;
        validate_range("thumbnails.max_size", self.thumbnails.max_size, MAX_SIZE_RANGE)?;
        validate_range("convert.quality", self.convert.quality, QUALITY_RANGE)?;
        Ok(())
    }
}

fn validate_range(key: &str, value: u32, (min, max): (u32, u32)) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Validation(format!(
            "{key} must be {min}-{max}, got {value}"
        )));
    }
    Ok(())
}

fn validate_extensions(key: &str, extensions: &[String]) -> Result<(), ConfigError> {
    if extensions.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    for ext in extensions {
        if ext.is_empty() || ext.starts_with('.') || *ext != ext.to_lowercase() {
            return Err(ConfigError::Validation(format!(
                "{key} entries are lowercase and written without a dot, got {ext:?}"
            )));
        }
    }
    Ok(())
}

/// Site-relative locations of inputs and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub images_dir: String,
    pub thumbs_dir: String,
    pub cad_dir: String,
    pub gallery_manifest: String,
    pub cad_manifest: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images_dir: "images".to_string(),
            thumbs_dir: "images/_thumbs".to_string(),
            cad_dir: "docs/cad".to_string(),
            gallery_manifest: "data/gallery.json".to_string(),
            cad_manifest: "data/cad.json".to_string(),
        }
    }
}

/// Gallery manifest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Section directory names under `images_dir`, in manifest order.
    pub sections: Vec<String>,
    /// Accepted extensions, most preferred first. When one asset exists in
    /// several formats, the first extension in this list wins.
    pub preferred_extensions: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            preferred_extensions: strings(&[
                "jpg", "jpeg", "png", "webp", "gif", "bmp", "svg", "heic", "heif",
            ]),
        }
    }
}

/// CAD manifest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CadConfig {
    /// Card image used until someone edits the manifest by hand.
    pub placeholder_thumb: String,
}

impl Default for CadConfig {
    fn default() -> Self {
        Self {
            placeholder_thumb: "assets/placeholders/cad1.svg".to_string(),
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Longest edge of a thumbnail, in pixels.
    pub max_size: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Source extensions that get a thumbnail.
    pub extensions: Vec<String>,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            max_size: 720,
            quality: 82,
            extensions: strings(&["jpg", "jpeg", "png", "webp", "bmp", "gif", "svg"]),
        }
    }
}

/// HEIC → JPEG conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Source extensions that get converted.
    pub extensions: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            quality: 92,
            extensions: strings(&["heic", "heif"]),
        }
    }
}

fn default_sections() -> Vec<String> {
    strings(&["projects", "boats", "fabrication"])
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Resolved paths
// =============================================================================

/// Configured paths resolved against a site root.
#[derive(Debug, Clone)]
pub struct SitePaths {
    root: PathBuf,
    images_dir: PathBuf,
    thumbs_dir: PathBuf,
    cad_dir: PathBuf,
    gallery_manifest: PathBuf,
    cad_manifest: PathBuf,
}

impl SitePaths {
    pub fn new(root: &Path, paths: &PathsConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            images_dir: root.join(&paths.images_dir),
            thumbs_dir: root.join(&paths.thumbs_dir),
            cad_dir: root.join(&paths.cad_dir),
            gallery_manifest: root.join(&paths.gallery_manifest),
            cad_manifest: root.join(&paths.cad_manifest),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cad_dir(&self) -> &Path {
        &self.cad_dir
    }

    pub fn gallery_manifest(&self) -> &Path {
        &self.gallery_manifest
    }

    pub fn cad_manifest(&self) -> &Path {
        &self.cad_manifest
    }

    /// Directory holding a section's source images.
    pub fn section_dir(&self, section: &str) -> PathBuf {
        self.images_dir.join(section)
    }

    /// Where the thumbnail for a section-relative source path lives.
    ///
    /// The source path is mirrored under `thumbs_dir/<section>` and the
    /// extension forced to `.jpg`:
    /// `projects/2024/deck.png` → `images/_thumbs/projects/2024/deck.jpg`.
    pub fn thumbnail_for(&self, section: &str, relative_in_section: &Path) -> PathBuf {
        self.thumbs_dir
            .join(section)
            .join(relative_in_section)
            .with_extension("jpg")
    }

    /// Render a path under the root as a `/`-separated site-relative string.
    ///
    /// Paths outside the root are rendered as-is.
    pub fn site_relative(&self, path: &Path) -> String {
        scan::relative_posix(&self.root, path)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config.
///
/// With an explicit path the file must exist. Otherwise `site-assets.toml`
/// in the site root is used when present, and the stock defaults when not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => {
            Some(load_raw_config(path)?.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?)
        }
        None => load_raw_config(&root.join(CONFIG_FILENAME))?,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# site-assets configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the site root as site-assets.toml, or pass it with
# --config. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Locations, relative to the site root (always use forward slashes)
# ---------------------------------------------------------------------------
[paths]
# Each gallery section is a directory under this one.
images_dir = "images"

# Thumbnails mirror the section tree under this directory, always as .jpg.
thumbs_dir = "images/_thumbs"

# Flat directory of CAD drawings (PDF). Not searched recursively.
cad_dir = "docs/cad"

# Generated manifests. Both are fully overwritten on every run.
gallery_manifest = "data/gallery.json"
cad_manifest = "data/cad.json"

# ---------------------------------------------------------------------------
# Gallery manifest
# ---------------------------------------------------------------------------
[gallery]
# Section directories, in the order they appear in the manifest.
sections = ["projects", "boats", "fabrication"]

# When one image exists in several formats (photo.heic + photo.jpg), the
# first extension in this list is the one that goes into the manifest.
preferred_extensions = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "svg", "heic", "heif"]

# ---------------------------------------------------------------------------
# CAD manifest
# ---------------------------------------------------------------------------
[cad]
# Card image for every generated item. Edit the manifest to replace it.
placeholder_thumb = "assets/placeholders/cad1.svg"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Longest edge in pixels (200-2000). Smaller images are never enlarged.
max_size = 720

# JPEG quality (1-100).
quality = 82

# Source formats that get a thumbnail.
extensions = ["jpg", "jpeg", "png", "webp", "bmp", "gif", "svg"]

# ---------------------------------------------------------------------------
# HEIC conversion
# ---------------------------------------------------------------------------
[convert]
# JPEG quality (1-100).
quality = 92

# Source formats converted to .jpg copies.
extensions = ["heic", "heif"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_site_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.paths.images_dir, "images");
        assert_eq!(config.paths.thumbs_dir, "images/_thumbs");
        assert_eq!(config.paths.gallery_manifest, "data/gallery.json");
        assert_eq!(config.gallery.sections, vec!["projects", "boats", "fabrication"]);
        assert_eq!(config.gallery.preferred_extensions[0], "jpg");
        assert_eq!(config.thumbnails.max_size, 720);
        assert_eq!(config.thumbnails.quality, 82);
        assert_eq!(config.convert.quality, 92);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[gallery]
sections = ["boats"]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gallery.sections, vec!["boats"]);
        // Defaults preserved
        assert_eq!(config.gallery.preferred_extensions.len(), 9);
        assert_eq!(config.paths.cad_dir, "docs/cad");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_site_root_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[paths]
cad_dir = "drawings"

[thumbnails]
max_size = 400
"#,
        )
        .unwrap();

        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.paths.cad_dir, "drawings");
        assert_eq!(config.thumbnails.max_size, 400);
        // Unspecified values should be defaults
        assert_eq!(config.thumbnails.quality, 82);
        assert_eq!(config.paths.images_dir, "images");
    }

    #[test]
    fn load_config_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[convert]\nquality = 75\n").unwrap();

        let config = load_config(tmp.path(), Some(&path)).unwrap();
        assert_eq!(config.convert.quality, 75);
    }

    #[test]
    fn load_config_explicit_path_must_exist() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.toml");
        let result = load_config(tmp.path(), Some(&path));
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path(), None);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[thumbnails]
max_size = 720
quality = 82
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[thumbnails]\nquality = 60\n").unwrap();
        let merged = merge_toml(base, overlay);
        let thumbs = merged.get("thumbnails").unwrap();
        assert_eq!(thumbs.get("quality").unwrap().as_integer(), Some(60));
        assert_eq!(thumbs.get("max_size").unwrap().as_integer(), Some(720));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value =
            toml::from_str(r#"sections = ["projects", "boats", "fabrication"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"sections = ["boats"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("sections").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[thumbnails]\nmax_sise = 100\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[rotate]\nangle = 90\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_out_of_range() {
        let mut config = SiteConfig::default();
        config.convert.quality = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = SiteConfig::default();
        config.thumbnails.quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_max_size_bounds() {
        let mut config = SiteConfig::default();
        config.thumbnails.max_size = 200;
        assert!(config.validate().is_ok());
        config.thumbnails.max_size = 199;
        assert!(config.validate().is_err());
        config.thumbnails.max_size = 2001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_dotted_extension() {
        let mut config = SiteConfig::default();
        config.gallery.preferred_extensions = vec![".jpg".to_string()];
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("gallery.preferred_extensions"));
    }

    #[test]
    fn validate_rejects_nested_section() {
        let mut config = SiteConfig::default();
        config.gallery.sections = vec!["projects/old".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_sections() {
        let mut config = SiteConfig::default();
        config.gallery.sections.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("[convert]\nquality = 200\n").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for key in ["paths", "gallery", "cad", "thumbnails", "convert"] {
            assert!(val.get(key).is_some(), "missing [{key}]");
        }
    }

    // =========================================================================
    // SitePaths tests
    // =========================================================================

    #[test]
    fn thumbnail_path_mirrors_section_tree() {
        let paths = SitePaths::new(Path::new("/site"), &PathsConfig::default());
        let thumb = paths.thumbnail_for("projects", Path::new("2024/deck.png"));
        assert_eq!(thumb, Path::new("/site/images/_thumbs/projects/2024/deck.jpg"));
    }

    #[test]
    fn thumbnail_path_keeps_inner_dots() {
        let paths = SitePaths::new(Path::new("/site"), &PathsConfig::default());
        let thumb = paths.thumbnail_for("boats", Path::new("hull v1.2.jpeg"));
        assert_eq!(thumb, Path::new("/site/images/_thumbs/boats/hull v1.2.jpg"));
    }

    #[test]
    fn site_relative_uses_forward_slashes() {
        let paths = SitePaths::new(Path::new("/site"), &PathsConfig::default());
        let section = paths.section_dir("boats");
        assert_eq!(paths.site_relative(&section.join("a.jpg")), "images/boats/a.jpg");
    }
}
