//! ImageMagick backend.
//!
//! Shells out to the `magick` CLI (ImageMagick 7). This is the only backend
//! able to decode HEIC/HEIF, provided ImageMagick was built with the libheif
//! delegate. Call [`ImageBackend::check_available`] before starting a batch
//! so a missing install fails once, up front, rather than once per file.
//!
//! | Operation | Arguments |
//! |---|---|
//! | Convert | `<src> -colorspace sRGB -quality Q jpg:<dst>` (EXIF kept) |
//! | Thumbnail | `<src> -resize NxN> -colorspace sRGB -strip -interlace Plane -quality Q jpg:<dst>` |

use super::backend::{BackendError, ImageBackend};
use super::params::{ConvertParams, ThumbnailParams};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

const DEFAULT_PROGRAM: &str = "magick";

/// Backend that runs an ImageMagick binary for each operation.
#[derive(Debug, Clone)]
pub struct MagickBackend {
    program: OsString,
}

impl MagickBackend {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a specific binary instead of `magick` from `PATH`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: Vec<OsString>, source: &Path) -> Result<(), BackendError> {
        tracing::debug!(program = %self.program.to_string_lossy(), ?args, "running ImageMagick");
        let output = Command::new(&self.program).args(&args).output()?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(BackendError::ProcessingFailed(format!(
            "ImageMagick failed on {}: {}",
            source.display(),
            stderr.trim()
        )))
    }
}

impl Default for MagickBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// `magick -version` lists compiled-in delegates on one line.
fn has_heic_delegate(version: &str) -> bool {
    version
        .lines()
        .filter(|line| line.starts_with("Delegates"))
        .any(|line| line.split_whitespace().any(|d| d.eq_ignore_ascii_case("heic")))
}

/// Prefix the output with `jpg:` so the format never depends on the extension.
fn jpeg_target(path: &Path) -> OsString {
    let mut target = OsString::from("jpg:");
    target.push(path);
    target
}

fn convert_args(params: &ConvertParams) -> Vec<OsString> {
    vec![
        params.source.clone().into_os_string(),
        "-colorspace".into(),
        "sRGB".into(),
        "-quality".into(),
        params.quality.value().to_string().into(),
        jpeg_target(&params.output),
    ]
}

fn thumbnail_args(params: &ThumbnailParams) -> Vec<OsString> {
    let edge = params.max_edge.value();
    vec![
        params.source.clone().into_os_string(),
        // `>` only ever shrinks
        "-resize".into(),
        format!("{edge}x{edge}>").into(),
        "-colorspace".into(),
        "sRGB".into(),
        "-strip".into(),
        "-interlace".into(),
        "Plane".into(),
        "-quality".into(),
        params.quality.value().to_string().into(),
        jpeg_target(&params.output),
    ]
}

impl ImageBackend for MagickBackend {
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        self.run(convert_args(params), &params.source)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        self.run(thumbnail_args(params), &params.source)
    }

    /// Verify the binary runs and lists the HEIC delegate.
    fn check_available(&self) -> Result<(), BackendError> {
        let output = match Command::new(&self.program).arg("-version").output() {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BackendError::Unavailable(format!(
                    "ImageMagick (`{}`) was not found on PATH.\n\
                     Install ImageMagick 7 with HEIC support, e.g. `brew install imagemagick` \
                     or `apt install imagemagick libheif1`, then run again.",
                    self.program.to_string_lossy()
                )));
            }
            Err(e) => return Err(BackendError::Io(e)),
        };

        let version = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() || !has_heic_delegate(&version) {
            return Err(BackendError::Unavailable(
                "ImageMagick is installed but cannot decode HEIC.\n\
                 Install a build with the libheif delegate (`magick -version` should list `heic` \
                 under Delegates), then run again."
                    .to_string(),
            ));
        }
        tracing::debug!(program = %self.program.to_string_lossy(), "ImageMagick with HEIC support found");
        Ok(())
    }
}
