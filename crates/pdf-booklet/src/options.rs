use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet creation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Page order and back-side handling
    pub flags: OrientationFlags,

    // Output sheet
    pub paper_size: PaperSize,
    pub print_dpi: f32,
    pub output_quality: u8,

    // Rasterization
    pub render_dpi: f32,

    // Previews
    pub preview_dir: PathBuf,
    pub preview_max_width: u32,
    pub preview_max_height: u32,
    pub preview_quality: u8,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            flags: OrientationFlags::default(),
            paper_size: PaperSize::A4,
            print_dpi: DEFAULT_PRINT_DPI,
            output_quality: DEFAULT_OUTPUT_QUALITY,
            render_dpi: DEFAULT_RENDER_DPI,
            preview_dir: PathBuf::from(DEFAULT_PREVIEW_DIR),
            preview_max_width: DEFAULT_PREVIEW_BOUND.0,
            preview_max_height: DEFAULT_PREVIEW_BOUND.1,
            preview_quality: DEFAULT_PREVIEW_QUALITY,
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BookletError::filesystem(path, e))?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| BookletError::filesystem(path, e))?;
        Ok(())
    }

    /// Pixel size of one output sheet side: the landscape paper at print resolution
    pub fn sheet_size(&self) -> SheetSize {
        let (w_mm, h_mm) = self.paper_size.landscape_mm();
        SheetSize::new(
            mm_to_px(w_mm, self.print_dpi),
            mm_to_px(h_mm, self.print_dpi),
        )
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.render_dpi.is_finite() && self.render_dpi > 0.0) {
            return Err(BookletError::Config(format!(
                "Render DPI must be positive, got {}",
                self.render_dpi
            )));
        }
        if self.render_dpi > MAX_RENDER_DPI {
            return Err(BookletError::Config(format!(
                "Render DPI must be at most {}, got {}",
                MAX_RENDER_DPI, self.render_dpi
            )));
        }
        if !(self.print_dpi.is_finite() && self.print_dpi > 0.0) {
            return Err(BookletError::Config(format!(
                "Print DPI must be positive, got {}",
                self.print_dpi
            )));
        }

        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        if !(w_mm.is_finite() && h_mm.is_finite() && w_mm > 0.0 && h_mm > 0.0) {
            return Err(BookletError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }

        // Each of the two cells needs at least one pixel
        let sheet = self.sheet_size();
        if sheet.width < 2 || sheet.height < 1 {
            return Err(BookletError::Config(format!(
                "Sheet of {}x{} px is too small to hold two pages",
                sheet.width, sheet.height
            )));
        }
        let pixels = u64::from(sheet.width) * u64::from(sheet.height);
        if pixels > MAX_SHEET_PIXELS {
            return Err(BookletError::Config(format!(
                "Sheet of {}x{} px is too large; lower the print DPI or paper size",
                sheet.width, sheet.height
            )));
        }

        if self.preview_max_width == 0 || self.preview_max_height == 0 {
            return Err(BookletError::Config(
                "Preview bounds must be positive".to_string(),
            ));
        }

        for (name, quality) in [
            ("Preview", self.preview_quality),
            ("Output", self.output_quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(BookletError::Config(format!(
                    "{} JPEG quality must be between 1 and 100, got {}",
                    name, quality
                )));
            }
        }

        if self.flags.rotate_all_pairs && self.flags.rotate_alternate_pairs {
            log::warn!("Both rotate-all and rotate-alternate are set; rotate-all takes precedence");
        }

        Ok(())
    }
}
