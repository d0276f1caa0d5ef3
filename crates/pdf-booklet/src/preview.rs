use crate::constants::PREVIEW_EXTENSION;
use crate::layout::shrink_within;
use crate::render::encode_jpeg;
use crate::types::*;
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};

/// Writes downscaled JPEG previews of composed sheets, one file per sheet side
#[derive(Debug, Clone)]
pub struct PreviewWriter {
    dir: PathBuf,
    max_width: u32,
    max_height: u32,
    quality: u8,
}

impl PreviewWriter {
    pub fn new(dir: impl Into<PathBuf>, max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            max_width,
            max_height,
            quality,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the preview directory and remove previews from earlier runs.
    ///
    /// Only `*.jpg` files are removed; anything else in the directory stays.
    pub fn prepare(&self) -> Result<usize> {
        std::fs::create_dir_all(&self.dir).map_err(|e| BookletError::filesystem(&self.dir, e))?;

        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| BookletError::filesystem(&self.dir, e))?;

        let mut removed = 0;
        for entry in entries {
            let path = entry
                .map_err(|e| BookletError::filesystem(&self.dir, e))?
                .path();
            let is_preview = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PREVIEW_EXTENSION));
            if is_preview {
                std::fs::remove_file(&path).map_err(|e| BookletError::filesystem(&path, e))?;
                removed += 1;
            }
        }

        if removed > 0 {
            log::debug!(
                "Removed {} old previews from {}",
                removed,
                self.dir.display()
            );
        }
        Ok(removed)
    }

    /// Path of the preview for the 1-based `sheet_index`
    pub fn path_for(&self, sheet_index: usize) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sheet_index, PREVIEW_EXTENSION))
    }

    /// Shrink `sheet` into the preview bound and write it as `<sheet_index>.jpg`
    pub fn write(&self, sheet_index: usize, sheet: &RgbImage) -> Result<PathBuf> {
        let (width, height) = shrink_within(
            sheet.width(),
            sheet.height(),
            self.max_width,
            self.max_height,
        );
        let jpeg = if (width, height) == sheet.dimensions() {
            encode_jpeg(sheet, self.quality)?
        } else {
            let thumbnail = imageops::resize(sheet, width, height, FilterType::Lanczos3);
            encode_jpeg(&thumbnail, self.quality)?
        };

        let path = self.path_for(sheet_index);
        std::fs::write(&path, jpeg).map_err(|e| BookletError::filesystem(&path, e))?;
        Ok(path)
    }
}
