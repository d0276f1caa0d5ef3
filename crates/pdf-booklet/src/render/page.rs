//! Output page construction
//!
//! One output page per sheet side: a MediaBox sized to the sheet at print
//! resolution and a content stream that paints the sheet image edge to edge.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Resource name of the sheet image on every page
const SHEET_IMAGE_NAME: &str = "Im0";

/// Create a page that shows `image_id` over its full `width_pt × height_pt`
pub fn render_sheet_page(
    output: &mut Document,
    image_id: ObjectId,
    width_pt: f32,
    height_pt: f32,
    parent_pages_id: ObjectId,
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );

    let mut xobjects = Dictionary::new();
    xobjects.set(SHEET_IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = format!(
        "q {} 0 0 {} 0 0 cm /{} Do Q\n",
        width_pt, height_pt, SHEET_IMAGE_NAME
    );
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Create pages tree and catalog, finalize document structure
pub fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
