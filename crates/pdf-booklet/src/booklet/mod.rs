//! Booklet creation
//!
//! This module orchestrates a booklet run:
//! 1. Check the request and render every source page
//! 2. Compute the page order for the sheets
//! 3. Compose each sheet side and write its preview
//! 4. Write all sheet sides to the output PDF

mod io;

pub use io::{count_pages, load_pdf};

use crate::compose::compose;
use crate::layout::{is_back_side, plan};
use crate::preview::PreviewWriter;
use crate::rasterize::Rasterizer;
use crate::render::{EncodedSheet, build_document};
use crate::report::{BookletReport, BookletRequest, PreviewDescriptor};
use crate::stats::statistics_for_plan;
use crate::types::*;
use io::{check_request, write_pdf};
use std::fmt;

/// Phase of a running booklet job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookletStage {
    Rasterizing,
    Composing,
    Writing,
}

impl fmt::Display for BookletStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookletStage::Rasterizing => "Rendering pages",
            BookletStage::Composing => "Composing sheets",
            BookletStage::Writing => "Writing PDF",
        })
    }
}

/// Progress report emitted while a booklet is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookletProgress {
    pub stage: BookletStage,
    pub current: usize,
    pub total: usize,
}

/// Main booklet creation function
pub async fn create_booklet<R>(request: BookletRequest, rasterizer: R) -> Result<BookletReport>
where
    R: Rasterizer + Send + 'static,
{
    create_booklet_with_progress(request, rasterizer, |_| {}).await
}

/// [`create_booklet`] reporting progress through `progress`
pub async fn create_booklet_with_progress<R, F>(
    request: BookletRequest,
    rasterizer: R,
    progress: F,
) -> Result<BookletReport>
where
    R: Rasterizer + Send + 'static,
    F: FnMut(BookletProgress) + Send + 'static,
{
    tokio::task::spawn_blocking(move || create_booklet_blocking(&request, &rasterizer, progress))
        .await?
}

/// Build the booklet on the current thread.
///
/// Nothing is written to the output path unless every sheet side was
/// composed. Previews are written as each side is finished.
pub fn create_booklet_blocking<R, F>(
    request: &BookletRequest,
    rasterizer: &R,
    mut progress: F,
) -> Result<BookletReport>
where
    R: Rasterizer + ?Sized,
    F: FnMut(BookletProgress),
{
    let options = &request.options;
    options.validate()?;
    check_request(request)?;

    log::info!(
        "Creating booklet {} from {}",
        request.output_path.display(),
        request.input_path.display()
    );

    progress(BookletProgress {
        stage: BookletStage::Rasterizing,
        current: 0,
        total: 1,
    });
    let pages = rasterizer.rasterize(&request.input_path, options.render_dpi)?;
    check_page_numbers(&pages)?;
    progress(BookletProgress {
        stage: BookletStage::Rasterizing,
        current: 1,
        total: 1,
    });

    let total_pages = pages.len();
    if total_pages == 0 {
        return Err(BookletError::NoPages);
    }

    let sequence = plan(total_pages, &options.flags);
    let statistics = statistics_for_plan(total_pages, &sequence);
    log::info!(
        "{} pages → {} sheet sides on {} sheets ({} blank slots)",
        statistics.source_pages,
        statistics.sheet_sides,
        statistics.sheets,
        statistics.blank_slots
    );

    let previews = PreviewWriter::new(
        &options.preview_dir,
        options.preview_max_width,
        options.preview_max_height,
        options.preview_quality,
    );
    previews.prepare()?;

    let sheet_size = options.sheet_size();
    let raster = |page: Option<usize>| page.map(|number| &pages[number - 1].image);

    let mut sheets = Vec::with_capacity(sequence.len());
    let mut descriptors = Vec::with_capacity(sequence.len());
    for (index, pair) in sequence.iter().enumerate() {
        let back = is_back_side(index);
        let sheet = compose(
            raster(pair.left),
            raster(pair.right),
            sheet_size,
            back,
            &options.flags,
        );

        sheets.push(EncodedSheet::encode(&sheet, options.output_quality)?);

        let sheet_index = index + 1;
        let preview_path = previews.write(sheet_index, &sheet)?;
        descriptors.push(PreviewDescriptor {
            sheet_index,
            preview_path,
            is_back_side: back,
            left_page: pair.left,
            right_page: pair.right,
        });

        log::debug!(
            "Sheet side {} ({}): left {:?}, right {:?}",
            sheet_index,
            if back { "back" } else { "front" },
            pair.left,
            pair.right
        );
        progress(BookletProgress {
            stage: BookletStage::Composing,
            current: sheet_index,
            total: sequence.len(),
        });
    }
    drop(pages);

    progress(BookletProgress {
        stage: BookletStage::Writing,
        current: 0,
        total: 1,
    });
    let mut document = build_document(&sheets, options.print_dpi);
    write_pdf(&mut document, &request.output_path)?;
    progress(BookletProgress {
        stage: BookletStage::Writing,
        current: 1,
        total: 1,
    });

    log::info!("Booklet created: {}", request.output_path.display());

    Ok(BookletReport {
        output_path: request.output_path.clone(),
        previews: descriptors,
        statistics,
    })
}

/// Rasters must come back as pages 1, 2, 3, … so page numbers index them
fn check_page_numbers(pages: &[PageRaster]) -> Result<()> {
    match pages
        .iter()
        .enumerate()
        .find(|(index, page)| page.page_number != index + 1)
    {
        Some((index, page)) => Err(BookletError::Rasterization(format!(
            "Rasterizer returned page {} in position {}",
            page.page_number,
            index + 1
        ))),
        None => Ok(()),
    }
}
