//! Shared constants for booklet creation
//!
//! Defaults for `BookletOptions`; nothing reads these directly during a run.

// =============================================================================
// Resolution
// =============================================================================

/// Resolution source pages are rasterized at
pub const DEFAULT_RENDER_DPI: f32 = 200.0;

/// Resolution recorded for the output sheets (A4 landscape → 3508×2480 px)
pub const DEFAULT_PRINT_DPI: f32 = 300.0;

/// Upper bound for `render_dpi`
pub const MAX_RENDER_DPI: f32 = 2400.0;

/// Largest sheet area, in pixels, a run may allocate (A3 at 1200 dpi fits)
pub const MAX_SHEET_PIXELS: u64 = 300_000_000;

/// PDF user space units per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

// =============================================================================
// Previews
// =============================================================================

/// Bounding box previews are shrunk into (width, height)
pub const DEFAULT_PREVIEW_BOUND: (u32, u32) = (1200, 850);

/// JPEG quality of preview images
pub const DEFAULT_PREVIEW_QUALITY: u8 = 90;

/// Directory previews are written to when none is configured
pub const DEFAULT_PREVIEW_DIR: &str = "previews";

/// File extension of preview images; only these are cleared between runs
pub const PREVIEW_EXTENSION: &str = "jpg";

// =============================================================================
// Output
// =============================================================================

/// JPEG quality of the sheet images embedded in the output PDF
pub const DEFAULT_OUTPUT_QUALITY: u8 = 95;

/// Convert a pixel length at `dpi` to PDF points
#[inline]
pub fn px_to_pt(px: u32, dpi: f32) -> f32 {
    px as f32 * POINTS_PER_INCH / dpi
}

/// Convert millimeters to whole pixels at `dpi`
#[inline]
pub fn mm_to_px(mm: f32, dpi: f32) -> u32 {
    (mm / MM_PER_INCH * dpi).round() as u32
}
