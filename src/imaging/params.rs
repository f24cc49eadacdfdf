//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the jobs (which decide which files to write) and the
//! [`backend`](super::backend) (which does the pixel work). This separation
//! allows swapping backends (e.g. for testing with a mock) without changing
//! job logic.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100). Clamped on construction.
//! - [`MaxEdge`]: Longest thumbnail edge (200–2000 px). Clamped on construction.
//! - [`ConvertParams`]: Re-encode a source image as JPEG at full size.
//! - [`ThumbnailParams`]: Shrink a source image to fit a square, as JPEG.

use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Clamp any integer, including negative ones from the command line.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(Self::MIN.into(), Self::MAX.into()) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Longest edge of a thumbnail in pixels (200-2000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxEdge(u32);

impl MaxEdge {
    pub const MIN: u32 = 200;
    pub const MAX: u32 = 2000;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(Self::MIN.into(), Self::MAX.into()) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Parameters for a full-size JPEG conversion.
///
/// Embedded EXIF is carried over when the backend can do so.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}

/// Parameters for a thumbnail operation (shrink to fit, never enlarge).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_edge: MaxEdge,
    pub quality: Quality,
}
