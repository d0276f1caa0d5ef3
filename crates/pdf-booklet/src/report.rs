//! Request and result shapes exchanged with the surrounding application

use crate::options::BookletOptions;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One booklet creation request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookletRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: BookletOptions,
}

impl BookletRequest {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            options: BookletOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BookletOptions) -> Self {
        self.options = options;
        self
    }
}

/// Preview of one printed sheet side
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreviewDescriptor {
    /// 1-based position in the output document
    pub sheet_index: usize,
    pub preview_path: PathBuf,
    pub is_back_side: bool,
    pub left_page: Option<usize>,
    pub right_page: Option<usize>,
}

/// Result of a successful booklet run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookletReport {
    pub output_path: PathBuf,
    pub previews: Vec<PreviewDescriptor>,
    pub statistics: BookletStatistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Flat success/failure result handed back to a caller such as a UI
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookletResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub output_path: Option<PathBuf>,
    /// Number of printed sheet sides in the output, 0 on failure
    #[cfg_attr(feature = "serde", serde(default))]
    pub sheet_sides: usize,
    pub previews: Vec<PreviewDescriptor>,
}

impl BookletResponse {
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

impl From<Result<BookletReport>> for BookletResponse {
    fn from(result: Result<BookletReport>) -> Self {
        match result {
            Ok(report) => Self {
                status: ResponseStatus::Success,
                message: format!("Booklet created: {}", report.output_path.display()),
                output_path: Some(report.output_path),
                sheet_sides: report.statistics.sheet_sides,
                previews: report.previews,
            },
            Err(e) => Self {
                status: ResponseStatus::Error,
                message: format!("Failed to create booklet: {}", e),
                output_path: None,
                sheet_sides: 0,
                previews: Vec::new(),
            },
        }
    }
}
