//! Sheet compositing
//!
//! Lays two source page rasters side by side onto one landscape sheet side.
//! Each page is turned upright, mirrored when it lands on the back of a sheet,
//! scaled to fit half the sheet and centered there.

use crate::layout::{center_offset, fit_within};
use crate::types::{OrientationFlags, SheetSize};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::borrow::Cow;

/// Sheet background
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Compose one sheet side from an optional left and right page.
///
/// The left page fills the cell at `(0, 0)`, the right page the cell at
/// `(sheet.width / 2, 0)`. Blank slots stay white, as do pages on a sheet
/// too narrow to give each cell a column of pixels.
pub fn compose(
    left: Option<&RgbImage>,
    right: Option<&RgbImage>,
    sheet: SheetSize,
    is_back_side: bool,
    flags: &OrientationFlags,
) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(sheet.width, sheet.height, BACKGROUND);
    let cell = sheet.cell();

    for (page, cell_x) in [(left, 0), (right, cell.0)] {
        let prepared = page.and_then(|page| prepare_page(page, cell, is_back_side, flags));
        if let Some(prepared) = prepared {
            let (dx, dy) = center_offset(prepared.dimensions(), cell);
            imageops::replace(
                &mut canvas,
                &prepared,
                i64::from(cell_x + dx),
                i64::from(dy),
            );
        }
    }

    canvas
}

/// Upright, flipped and scaled copy of `page` sized to fit `cell`, or `None`
/// when nothing of it fits
fn prepare_page(
    page: &RgbImage,
    cell: (u32, u32),
    is_back_side: bool,
    flags: &OrientationFlags,
) -> Option<RgbImage> {
    let mut upright = to_portrait(page);
    let (width, height) = fit_within(upright.width(), upright.height(), cell.0, cell.1);
    if width == 0 || height == 0 {
        return None;
    }

    if is_back_side {
        // Vertical before horizontal
        if flags.flip_vertical_on_back {
            imageops::flip_vertical_in_place(upright.to_mut());
        }
        if flags.flip_horizontal_on_back {
            imageops::flip_horizontal_in_place(upright.to_mut());
        }
    }

    Some(imageops::resize(&*upright, width, height, FilterType::Lanczos3))
}

/// Pages that are not strictly taller than wide are turned 90° clockwise
pub fn to_portrait(page: &RgbImage) -> Cow<'_, RgbImage> {
    if page.height() > page.width() {
        Cow::Borrowed(page)
    } else {
        Cow::Owned(imageops::rotate90(page))
    }
}
