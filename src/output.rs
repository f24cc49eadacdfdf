//! CLI output formatting for all jobs.
//!
//! # Output Format
//!
//! ## convert-heic
//!
//! ```text
//! [projects] Found 2 file(s).
//!   convert  images/projects/a.heic -> images/projects/a.jpg
//!   delete   images/projects/a.heic
//!   skip  images/projects/b.heic -> images/projects/b.jpg (exists)
//! [boats] No HEIC/HEIF files found.
//!
//! Summary:
//!   converted: 1
//!   skipped:   1
//!   deleted:   1
//!   failed:    0
//! ```
//!
//! ## thumbnails
//!
//! ```text
//! [projects] 3 source file(s).
//!   error  images/projects/logo.svg: Processing failed: ...
//! [boats] No source files found.
//!
//! Summary:
//!   generated: 2
//!   skipped:   0
//!   failed:    1
//! ```
//!
//! Thumbnails list only failures (and, in a dry run, what would be written);
//! a full site has hundreds of them.
//!
//! ## gallery / cad
//!
//! ```text
//! Wrote data/gallery.json with 42 images across 3 sections.
//! Wrote data/cad.json with 7 CAD card(s).
//! ```
//!
//! # Architecture
//!
//! Each job has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::cad::CadManifest;
use crate::gallery::GalleryManifest;
use crate::summary::{ItemOutcome, JobReport, Summary};

/// Return indentation string: 2 spaces per depth level.
fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn section_header(section: &str, text: &str) -> String {
    format!("[{}] {}", section, text)
}

/// Summary block shared by both file jobs. `written_label` is the verb for
/// [`Summary::written`]; `deleted` is shown only for conversion.
fn summary_lines(summary: &Summary, written_label: &str, show_deleted: bool) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Summary:".to_string(),
        format!("{}{:<11}{}", indent(1), format!("{}:", written_label), summary.written),
        format!("{}{:<11}{}", indent(1), "skipped:", summary.skipped),
    ];
    if show_deleted {
        lines.push(format!("{}{:<11}{}", indent(1), "deleted:", summary.deleted));
    }
    lines.push(format!("{}{:<11}{}", indent(1), "failed:", summary.failed));
    lines
}

// ============================================================================
// convert-heic
// ============================================================================

/// Format the report of a HEIC conversion run.
pub fn format_convert_report(report: &JobReport) -> Vec<String> {
    let mut lines = Vec::new();

    for section in &report.sections {
        if section.items.is_empty() {
            lines.push(section_header(&section.section, "No HEIC/HEIF files found."));
            continue;
        }
        lines.push(section_header(
            &section.section,
            &format!("Found {} file(s).", section.items.len()),
        ));

        for item in &section.items {
            match &item.outcome {
                ItemOutcome::Skipped => lines.push(format!(
                    "{}skip  {} -> {} (exists)",
                    indent(1),
                    item.source,
                    item.target
                )),
                ItemOutcome::Written => lines.push(format!(
                    "{}convert  {} -> {}",
                    indent(1),
                    item.source,
                    item.target
                )),
                ItemOutcome::WouldWrite => lines.push(format!(
                    "{}would convert  {} -> {}",
                    indent(1),
                    item.source,
                    item.target
                )),
                ItemOutcome::Failed(message) => lines.push(format!(
                    "{}error    {}: {}",
                    indent(1),
                    item.source,
                    message
                )),
            }
            if item.deleted {
                lines.push(format!("{}delete   {}", indent(1), item.source));
            }
        }
    }

    lines.extend(summary_lines(&report.summary(), "converted", true));
    lines
}

pub fn print_convert_report(report: &JobReport) {
    for line in format_convert_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// thumbnails
// ============================================================================

/// Format the report of a thumbnail run.
pub fn format_thumbnail_report(report: &JobReport) -> Vec<String> {
    let mut lines = Vec::new();

    for section in &report.sections {
        if section.items.is_empty() {
            lines.push(section_header(&section.section, "No source files found."));
            continue;
        }
        lines.push(section_header(
            &section.section,
            &format!("{} source file(s).", section.items.len()),
        ));

        for item in &section.items {
            match &item.outcome {
                ItemOutcome::WouldWrite => lines.push(format!(
                    "{}would generate  {} -> {}",
                    indent(1),
                    item.source,
                    item.target
                )),
                ItemOutcome::Failed(message) => lines.push(format!(
                    "{}error  {}: {}",
                    indent(1),
                    item.source,
                    message
                )),
                ItemOutcome::Written | ItemOutcome::Skipped => {}
            }
        }
    }

    lines.extend(summary_lines(&report.summary(), "generated", false));
    lines
}

pub fn print_thumbnail_report(report: &JobReport) {
    for line in format_thumbnail_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Manifests
// ============================================================================

/// One-line confirmation after writing the gallery manifest.
pub fn format_gallery_written(output: &str, gallery: &GalleryManifest) -> String {
    let total: usize = gallery.sections.values().map(Vec::len).sum();
    format!(
        "Wrote {} with {} images across {} sections.",
        output,
        total,
        gallery.sections.len()
    )
}

pub fn print_gallery_written(output: &str, gallery: &GalleryManifest) {
    println!("{}", format_gallery_written(output, gallery));
}

/// One-line confirmation after writing the CAD manifest.
pub fn format_cad_written(output: &str, cad: &CadManifest) -> String {
    format!("Wrote {} with {} CAD card(s).", output, cad.items.len())
}

pub fn print_cad_written(output: &str, cad: &CadManifest) {
    println!("{}", format_cad_written(output, cad));
}
