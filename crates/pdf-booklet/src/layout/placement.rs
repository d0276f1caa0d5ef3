//! Content placement within cells
//!
//! Aspect-preserving fit of a page raster into a sheet cell and the
//! offset that centers it there.

/// Scale `(width, height)` to fit inside `(max_width, max_height)` keeping
/// the aspect ratio.
///
/// A source that is relatively wider than the target is bound by width,
/// otherwise by height. Lengths are truncated and never drop below 1 px,
/// except that an empty source or an empty target fits as `(0, 0)`.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }

    let source_ratio = width as f64 / height as f64;
    let target_ratio = max_width as f64 / max_height as f64;

    let (w, h) = if source_ratio > target_ratio {
        (max_width, (max_width as f64 / source_ratio) as u32)
    } else {
        ((max_height as f64 * source_ratio) as u32, max_height)
    };

    (w.clamp(1, max_width), h.clamp(1, max_height))
}

/// Like [`fit_within`] but never enlarges the source
pub fn shrink_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        (width, height)
    } else {
        fit_within(width, height, max_width, max_height)
    }
}

/// Offset (floor) that centers `inner` inside `outer`
pub fn center_offset(inner: (u32, u32), outer: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}

// =============================================================================
// Tests
// =============================================================================
