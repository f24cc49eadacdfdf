//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the size of an image shrunk to fit inside a `max_edge` square.
///
/// The aspect ratio is preserved and images already inside the square are
/// left alone; thumbnails are never enlarged.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `max_edge` - Longest allowed edge in pixels
///
/// # Returns
/// * `(width, height)` - Output dimensions, each at least 1
///
/// # Examples
/// ```
/// # use site_assets::imaging::fit_within;
/// // 4000x3000 landscape at 720 → 720x540
/// assert_eq!(fit_within((4000, 3000), 720), (720, 540));
///
/// // Already small enough → unchanged
/// assert_eq!(fit_within((640, 480), 720), (640, 480));
/// ```
pub fn fit_within(source: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w <= max_edge && src_h <= max_edge {
        return source;
    }

    if src_w >= src_h {
        // Landscape or square: width is the long edge
        let h = (src_h as f64 * max_edge as f64 / src_w as f64).round() as u32;
        (max_edge, h.max(1))
    } else {
        // Portrait: height is the long edge
        let w = (src_w as f64 * max_edge as f64 / src_h as f64).round() as u32;
        (w.max(1), max_edge)
    }
}
