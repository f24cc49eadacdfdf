//! # Site Assets
//!
//! Maintenance jobs for the image and CAD asset tree of a static website.
//! The site's frontend reads two JSON manifests; everything here exists to
//! keep those manifests, and the files they point at, in step with what is
//! actually on disk.
//!
//! # Jobs
//!
//! Each job is an independent batch over the site root:
//!
//! ```text
//! convert-heic  images/<section>/**.heic  →  sibling .jpg files
//! thumbnails    images/<section>/**       →  images/_thumbs/<section>/**.jpg
//! gallery       images/<section>/**       →  data/gallery.json
//! cad           docs/cad/*.pdf            →  data/cad.json
//! ```
//!
//! Running them in that order after adding photos yields a gallery whose
//! entries point at browser-friendly JPEGs with thumbnails.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks a directory, filters by extension, yields sorted relative paths |
//! | [`gallery`] | Groups section images by asset, picks one format, writes the gallery manifest |
//! | [`cad`] | Groups CAD PDFs into cards by filename heuristic, writes the CAD manifest |
//! | [`manifest`] | Pretty JSON writer shared by both manifests |
//! | [`convert`] | HEIC/HEIF → JPEG conversion job |
//! | [`thumbnails`] | Thumbnail generation job |
//! | [`summary`] | Per-file outcomes and the aggregated exit status |
//! | [`imaging`] | Backend seam: pure-Rust `image` crate or the ImageMagick CLI |
//! | [`config`] | `site-assets.toml` loading, merging over defaults, validation |
//! | [`output`] | CLI report formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Rebuild, Never Merge
//!
//! Manifests are regenerated from a fresh scan every time and overwrite the
//! previous file. Output is deterministic: the same tree always produces the
//! same bytes, so a manifest diff in version control shows exactly what
//! changed on disk.
//!
//! ## Missing Is Empty
//!
//! A section without a directory contributes an empty list, and a missing
//! thumbnail falls back to the full image. Neither is an error. The CAD
//! directory is the exception: the CAD manifest has nothing else to describe,
//! so a missing directory stops the job.
//!
//! ## Fault Isolation Per File
//!
//! The conversion jobs record a result for every file and keep going after a
//! failure. The run's exit status is 2 if anything failed, so scripts notice
//! partial success. Fatal problems (no HEIC decoder, bad config, manifest
//! I/O) exit with 1 before or instead of producing a report.
//!
//! ## HEIC Through ImageMagick
//!
//! There is no pure-Rust HEIC decoder in our dependency stack, so conversion
//! shells out to `magick`. The binary is probed once at startup and a missing
//! or HEIC-less install is reported with install instructions. Thumbnails
//! default to the statically linked [`imaging::RustBackend`].

pub mod cad;
pub mod config;
pub mod convert;
pub mod gallery;
pub mod imaging;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod scan;
pub mod summary;
pub mod thumbnails;

#[cfg(test)]
pub(crate) mod test_helpers;
