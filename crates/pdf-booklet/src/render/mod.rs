//! PDF output for composed sheets
//!
//! - Encoding composed sheets as JPEG image XObjects
//! - Building one page per sheet side at print resolution
//! - Assembling the page tree and catalog

mod page;
mod xobject;

pub use page::{finalize_document, render_sheet_page};
pub use xobject::{EncodedSheet, create_image_xobject, encode_jpeg};

use crate::constants::px_to_pt;
use lopdf::{Document, Object};

/// Build a document with one page per sheet, in order.
///
/// Page size in points is the pixel size scaled from `print_dpi` to 72 dpi.
pub fn build_document(sheets: &[EncodedSheet], print_dpi: f32) -> Document {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    let page_refs = sheets
        .iter()
        .map(|sheet| {
            let image_id = create_image_xobject(&mut output, sheet);
            let page_id = render_sheet_page(
                &mut output,
                image_id,
                px_to_pt(sheet.width, print_dpi),
                px_to_pt(sheet.height, print_dpi),
                pages_tree_id,
            );
            Object::Reference(page_id)
        })
        .collect();

    finalize_document(&mut output, pages_tree_id, page_refs);
    output
}
