use image::RgbImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rasterization failed: {0}")]
    Rasterization(String),
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
}

impl BookletError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BookletError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Dimensions with the long edge horizontal. Booklet sheets are always
    /// printed landscape, two portrait leaves side by side.
    pub fn landscape_mm(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        if w >= h { (w, h) } else { (h, w) }
    }
}

/// Orientation and flip settings for one booklet run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientationFlags {
    /// Swap left and right within every sheet-side pair
    pub rotate_all_pairs: bool,
    /// Swap left and right within every second pair (the back sides)
    pub rotate_alternate_pairs: bool,
    /// Mirror back-side pages left to right
    pub flip_horizontal_on_back: bool,
    /// Mirror back-side pages top to bottom
    pub flip_vertical_on_back: bool,
}

/// Two logical page slots on one printed sheet side.
///
/// Page numbers are 1-based; `None` is a blank slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSidePair {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl SheetSidePair {
    pub fn new(left: Option<usize>, right: Option<usize>) -> Self {
        Self { left, right }
    }

    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of blank slots on this side (0, 1 or 2)
    pub fn blank_slots(&self) -> usize {
        usize::from(self.left.is_none()) + usize::from(self.right.is_none())
    }
}

/// Pixel dimensions of one output sheet side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSize {
    pub width: u32,
    pub height: u32,
}

impl SheetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of one of the two page cells on the sheet
    pub fn cell(self) -> (u32, u32) {
        (self.width / 2, self.height)
    }
}

/// A rendered source page
#[derive(Debug, Clone)]
pub struct PageRaster {
    /// 1-based position in the source document
    pub page_number: usize,
    pub image: RgbImage,
}

impl PageRaster {
    pub fn new(page_number: usize, image: RgbImage) -> Self {
        Self { page_number, image }
    }
}

/// Statistics about a booklet run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookletStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of printed sheet sides (output PDF pages)
    pub sheet_sides: usize,
    /// Number of physical sheets (front and back)
    pub sheets: usize,
    /// Page slots left blank on the printed sides
    pub blank_slots: usize,
}
