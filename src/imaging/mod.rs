//! Image processing.
//!
//! | Operation | Rust backend | Magick backend |
//! |---|---|---|
//! | **Convert → JPEG** | `image` decode + `JpegEncoder` | `magick <src> jpg:<dst>` |
//! | **Thumbnail** | [`fit_within`] + Lanczos3 + `JpegEncoder` | `magick -resize NxN>` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] + [`MagickBackend`]

pub mod backend;
mod calculations;
pub mod magick_backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::fit_within;
pub use magick_backend::MagickBackend;
pub use params::{ConvertParams, MaxEdge, Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
