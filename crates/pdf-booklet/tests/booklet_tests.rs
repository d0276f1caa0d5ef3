use image::{Rgb, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_booklet::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GRAY: Rgb<u8> = Rgb([40, 40, 40]);

/// Renders `pages` portrait pages without reading the input; page 1 is red
struct SyntheticRasterizer {
    pages: usize,
}

impl Rasterizer for SyntheticRasterizer {
    fn rasterize(&self, _path: &Path, _dpi: f32) -> Result<Vec<PageRaster>> {
        Ok((1..=self.pages)
            .map(|number| {
                let color = if number == 1 { RED } else { GRAY };
                PageRaster::new(number, RgbImage::from_pixel(100, 140, color))
            })
            .collect())
    }
}

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, path: &Path, _dpi: f32) -> Result<Vec<PageRaster>> {
        Err(BookletError::Rasterization(format!(
            "cannot open {}",
            path.display()
        )))
    }
}

/// Returns its pages out of order
struct ShuffledRasterizer;

impl Rasterizer for ShuffledRasterizer {
    fn rasterize(&self, _path: &Path, _dpi: f32) -> Result<Vec<PageRaster>> {
        Ok(vec![
            PageRaster::new(2, RgbImage::new(10, 10)),
            PageRaster::new(1, RgbImage::new(10, 10)),
        ])
    }
}

fn create_test_document(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn write_test_pdf(dir: &Path, num_pages: usize) -> PathBuf {
    let path = dir.join("input.pdf");
    create_test_document(num_pages).save(&path).unwrap();
    path
}

/// A4 at 25.4 dpi keeps sheets at 297x210 px
fn small_options(preview_dir: PathBuf) -> BookletOptions {
    BookletOptions {
        print_dpi: 25.4,
        render_dpi: 72.0,
        preview_dir,
        ..Default::default()
    }
}

fn request_in(dir: &TempDir, pages: usize) -> BookletRequest {
    let input = write_test_pdf(dir.path(), pages);
    BookletRequest::new(input, dir.path().join("booklet.pdf"))
        .with_options(small_options(dir.path().join("previews")))
}

#[test]
fn test_five_page_booklet() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 5);

    let report =
        create_booklet_blocking(&request, &SyntheticRasterizer { pages: 5 }, |_| {}).unwrap();

    let expected = plan(5, &request.options.flags);
    assert_eq!(report.previews.len(), expected.len());
    assert_eq!(
        report.statistics,
        BookletStatistics {
            source_pages: 5,
            sheet_sides: 4,
            sheets: 2,
            blank_slots: 3,
        }
    );

    let output = Document::load(&request.output_path).unwrap();
    assert_eq!(output.get_pages().len(), expected.len());
}

#[test]
fn test_preview_descriptors_follow_plan() {
    let dir = TempDir::new().unwrap();
    let mut request = request_in(&dir, 6);
    request.options.flags.rotate_alternate_pairs = true;

    let report =
        create_booklet_blocking(&request, &SyntheticRasterizer { pages: 6 }, |_| {}).unwrap();
    let expected = plan(6, &request.options.flags);

    for (index, (descriptor, pair)) in report.previews.iter().zip(&expected).enumerate() {
        assert_eq!(descriptor.sheet_index, index + 1);
        assert_eq!(descriptor.is_back_side, index % 2 == 1);
        assert_eq!(descriptor.left_page, pair.left);
        assert_eq!(descriptor.right_page, pair.right);
        assert_eq!(
            descriptor.preview_path,
            dir.path().join("previews").join(format!("{}.jpg", index + 1))
        );
        assert!(descriptor.preview_path.is_file());
    }
}

#[test]
fn test_previews_replace_old_ones() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 5);
    let preview_dir = dir.path().join("previews");
    std::fs::create_dir_all(&preview_dir).unwrap();
    std::fs::write(preview_dir.join("9.jpg"), b"stale").unwrap();
    std::fs::write(preview_dir.join("notes.txt"), b"keep me").unwrap();

    create_booklet_blocking(&request, &SyntheticRasterizer { pages: 5 }, |_| {}).unwrap();

    assert!(!preview_dir.join("9.jpg").exists());
    assert!(preview_dir.join("notes.txt").exists());
    for index in 1..=4 {
        assert!(preview_dir.join(format!("{}.jpg", index)).is_file());
    }
    assert!(!preview_dir.join("5.jpg").exists());
}

#[test]
fn test_preview_shows_first_page_on_the_left() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 5);

    let report =
        create_booklet_blocking(&request, &SyntheticRasterizer { pages: 5 }, |_| {}).unwrap();

    // Sheet fits the preview bound, so the preview keeps its size
    let preview = image::open(&report.previews[0].preview_path)
        .unwrap()
        .to_rgb8();
    assert_eq!(preview.dimensions(), (297, 210));

    let left = preview.get_pixel(74, 105);
    assert!(left.0[0] > 200 && left.0[1] < 60, "left cell: {:?}", left);
    let right = preview.get_pixel(222, 105);
    assert!(right.0.iter().all(|&c| c > 230), "right cell: {:?}", right);
}

#[test]
fn test_large_sheet_preview_is_shrunk() {
    let dir = TempDir::new().unwrap();
    let mut request = request_in(&dir, 2);
    request.options.preview_max_width = 100;
    request.options.preview_max_height = 100;

    let report =
        create_booklet_blocking(&request, &SyntheticRasterizer { pages: 2 }, |_| {}).unwrap();

    let (width, height) = image::image_dimensions(&report.previews[0].preview_path).unwrap();
    assert_eq!(width, 100);
    assert!(height < 100);
}

#[test]
fn test_output_pages_match_print_size() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 4);

    create_booklet_blocking(&request, &SyntheticRasterizer { pages: 4 }, |_| {}).unwrap();

    let output = Document::load(&request.output_path).unwrap();
    for (_, page_id) in output.get_pages() {
        let page = output.get_object(page_id).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();

        // 297x210 mm in points
        assert!((width - 841.9).abs() < 0.1, "width {}", width);
        assert!((height - 595.3).abs() < 0.1, "height {}", height);

        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
        let image = output.get_object(image_id).unwrap().as_stream().unwrap();
        assert_eq!(
            image.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"DCTDecode"
        );
        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 297);
        assert_eq!(&image.content[..2], &[0xFF, 0xD8]);
    }
}

#[test]
fn test_progress_reaches_every_stage() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 8);

    let mut updates = Vec::new();
    create_booklet_blocking(&request, &SyntheticRasterizer { pages: 8 }, |p| {
        updates.push(p)
    })
    .unwrap();

    let composed: Vec<_> = updates
        .iter()
        .filter(|p| p.stage == BookletStage::Composing)
        .map(|p| (p.current, p.total))
        .collect();
    assert_eq!(composed, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    assert_eq!(updates.first().map(|p| p.stage), Some(BookletStage::Rasterizing));
    assert_eq!(
        updates.last(),
        Some(&BookletProgress {
            stage: BookletStage::Writing,
            current: 1,
            total: 1,
        })
    );
}

#[test]
fn test_missing_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let request = BookletRequest::new(dir.path().join("missing.pdf"), dir.path().join("out.pdf"))
        .with_options(small_options(dir.path().join("previews")));

    let result = create_booklet_blocking(&request, &SyntheticRasterizer { pages: 4 }, |_| {});
    assert!(matches!(result, Err(BookletError::InvalidInput(_))));
    assert!(!dir.path().join("previews").exists());
}

#[test]
fn test_missing_output_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), 4);
    let request = BookletRequest::new(input, dir.path().join("nowhere").join("out.pdf"))
        .with_options(small_options(dir.path().join("previews")));

    match create_booklet_blocking(&request, &SyntheticRasterizer { pages: 4 }, |_| {}) {
        Err(BookletError::InvalidInput(msg)) => {
            assert!(msg.contains("Output directory does not exist"))
        }
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_output_directory_as_path_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), 4);
    let request = BookletRequest::new(input, dir.path())
        .with_options(small_options(dir.path().join("previews")));

    let result = create_booklet_blocking(&request, &SyntheticRasterizer { pages: 4 }, |_| {});
    assert!(matches!(result, Err(BookletError::InvalidInput(_))));
}

#[test]
fn test_invalid_options_are_rejected_first() {
    let dir = TempDir::new().unwrap();
    let mut request = request_in(&dir, 4);
    request.options.render_dpi = 0.0;

    let result = create_booklet_blocking(&request, &SyntheticRasterizer { pages: 4 }, |_| {});
    assert!(matches!(result, Err(BookletError::Config(_))));
}

#[test]
fn test_rasterizer_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 4);

    let result = create_booklet_blocking(&request, &FailingRasterizer, |_| {});
    assert!(matches!(result, Err(BookletError::Rasterization(_))));
    assert!(!request.output_path.exists());
}

#[test]
fn test_out_of_order_rasters_are_rejected() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 2);

    match create_booklet_blocking(&request, &ShuffledRasterizer, |_| {}) {
        Err(BookletError::Rasterization(msg)) => assert!(msg.contains("page 2 in position 1")),
        other => panic!("Expected Rasterization error, got {:?}", other),
    }
}

#[test]
fn test_document_without_pages() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 0);

    let result = create_booklet_blocking(&request, &SyntheticRasterizer { pages: 0 }, |_| {});
    assert!(matches!(result, Err(BookletError::NoPages)));
    assert!(!request.output_path.exists());
}

#[test]
fn test_response_from_result() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 3);

    let ok = BookletResponse::from(create_booklet_blocking(
        &request,
        &SyntheticRasterizer { pages: 3 },
        |_| {},
    ));
    assert!(ok.is_success());
    assert_eq!(ok.output_path.as_deref(), Some(request.output_path.as_path()));
    assert_eq!(ok.previews.len(), 2);
    assert_eq!(ok.sheet_sides, 2);
    assert!(ok.message.starts_with("Booklet created"));

    let failed = BookletResponse::from(create_booklet_blocking(&request, &FailingRasterizer, |_| {}));
    assert_eq!(failed.status, ResponseStatus::Error);
    assert!(failed.message.starts_with("Failed to create booklet"));
    assert!(failed.message.contains("cannot open"));
    assert!(failed.output_path.is_none());
    assert!(failed.previews.is_empty());
    assert_eq!(failed.sheet_sides, 0);
}

#[tokio::test]
async fn test_async_create_booklet() {
    let dir = TempDir::new().unwrap();
    let request = request_in(&dir, 7);
    let output_path = request.output_path.clone();

    let report = create_booklet(request, SyntheticRasterizer { pages: 7 })
        .await
        .unwrap();

    assert_eq!(report.output_path, output_path);
    assert_eq!(count_pages(&output_path).await.unwrap(), report.statistics.sheet_sides);
}

#[tokio::test]
async fn test_count_pages() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), 3);

    assert_eq!(count_pages(&input).await.unwrap(), 3);
}

#[tokio::test]
async fn test_load_missing_pdf() {
    let result = load_pdf("/nonexistent/input.pdf").await;
    assert!(matches!(result, Err(BookletError::Filesystem { .. })));
}
