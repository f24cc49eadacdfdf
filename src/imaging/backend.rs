//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the jobs need:
//! a full-size JPEG conversion and a shrink-to-fit JPEG thumbnail.
//!
//! | Backend | Decodes | Notes |
//! |---|---|---|
//! | [`RustBackend`](super::rust_backend::RustBackend) | JPEG, PNG, WebP, GIF, BMP, TIFF | statically linked, no HEIC |
//! | [`MagickBackend`](super::magick_backend::MagickBackend) | whatever ImageMagick was built with | needs `magick` on `PATH`, used for HEIC |

use super::params::{ConvertParams, ThumbnailParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("{0}")]
    Unavailable(String),
}

/// Trait for image processing backends.
///
/// Implementations write `params.output` and nothing else. The output's
/// parent directory must already exist.
pub trait ImageBackend {
    /// Re-encode `params.source` as a full-size JPEG.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;

    /// Shrink `params.source` to fit within `max_edge` and save as JPEG.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;

    /// Probe external requirements before a batch starts.
    ///
    /// Returns [`BackendError::Unavailable`] with remediation instructions
    /// when the backend cannot decode HEIC/HEIF.
    fn check_available(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
