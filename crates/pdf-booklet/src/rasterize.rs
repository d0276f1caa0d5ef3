//! Page rasterization
//!
//! Booklet sheets are built from bitmaps, not PDF content streams. A
//! [`Rasterizer`] renders every page of the input document once per run.

use crate::types::*;
use std::path::Path;

#[cfg(feature = "pdfium")]
use image::RgbaImage;
#[cfg(feature = "pdfium")]
use pdfium_render::prelude::*;
#[cfg(feature = "pdfium")]
use std::path::PathBuf;

/// Renders the pages of a PDF to RGB rasters
pub trait Rasterizer {
    /// Render every page of the document at `path` at `dpi`.
    ///
    /// Rasters are returned in document order with `page_number` 1, 2, 3, …
    fn rasterize(&self, path: &Path, dpi: f32) -> Result<Vec<PageRaster>>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, path: &Path, dpi: f32) -> Result<Vec<PageRaster>> {
        (**self).rasterize(path, dpi)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn rasterize(&self, path: &Path, dpi: f32) -> Result<Vec<PageRaster>> {
        (**self).rasterize(path, dpi)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for std::sync::Arc<R> {
    fn rasterize(&self, path: &Path, dpi: f32) -> Result<Vec<PageRaster>> {
        (**self).rasterize(path, dpi)
    }
}

/// Rasterizer backed by the PDFium library, loaded at runtime
#[cfg(feature = "pdfium")]
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
}

#[cfg(feature = "pdfium")]
impl PdfiumRasterizer {
    /// Search `./vendor/pdfium/lib`, then the system library paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Try `dir` before the default search locations
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: Some(dir.into()),
        }
    }

    fn bind(&self) -> std::result::Result<Pdfium, PdfiumError> {
        let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
            p.push("vendor/pdfium/lib");
            if p.exists() { Some(p) } else { None }
        });

        for dir in self.library_dir.iter().chain(vendor_path.iter()) {
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                Ok(binding) => return Ok(Pdfium::new(binding)),
                Err(e) => log::debug!("PDFium not loadable from {}: {}", dir.display(), e),
            }
        }

        Pdfium::bind_to_system_library().map(Pdfium::new)
    }
}

#[cfg(feature = "pdfium")]
impl Rasterizer for PdfiumRasterizer {
    fn rasterize(&self, path: &Path, dpi: f32) -> Result<Vec<PageRaster>> {
        let pdfium = self
            .bind()
            .map_err(|e| BookletError::Rasterization(format!("Failed to load PDFium: {}", e)))?;
        let document = pdfium.load_pdf_from_file(path, None).map_err(|e| {
            BookletError::Rasterization(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let config = PdfRenderConfig::new().scale_page_by_factor(dpi / 72.0);

        let mut rasters = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let page_number = index + 1;
            let bitmap = page.render_with_config(&config).map_err(|e| {
                BookletError::Rasterization(format!("Failed to render page {}: {}", page_number, e))
            })?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
                .ok_or_else(|| {
                    BookletError::Rasterization(format!(
                        "Page {} bitmap does not match its {}x{} size",
                        page_number, width, height
                    ))
                })?;

            log::debug!("Rendered page {} at {}x{}", page_number, width, height);
            rasters.push(PageRaster::new(
                page_number,
                image::DynamicImage::ImageRgba8(rgba).to_rgb8(),
            ));
        }

        Ok(rasters)
    }
}
