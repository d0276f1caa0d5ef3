use pdf_booklet::*;

fn stats(source_pages: usize, sheet_sides: usize, sheets: usize, blank_slots: usize) -> BookletStatistics {
    BookletStatistics {
        source_pages,
        sheet_sides,
        sheets,
        blank_slots,
    }
}

#[test]
fn test_stats_no_pages() {
    let result = calculate_statistics(0, &OrientationFlags::default());
    assert_eq!(result, stats(0, 0, 0, 0));
}

#[test]
fn test_stats_single_page() {
    let result = calculate_statistics(1, &OrientationFlags::default());
    assert_eq!(result, stats(1, 1, 1, 1));
}

#[test]
fn test_stats_full_rows() {
    let flags = OrientationFlags::default();
    assert_eq!(calculate_statistics(4, &flags), stats(4, 2, 1, 0));
    assert_eq!(calculate_statistics(8, &flags), stats(8, 4, 2, 0));
    assert_eq!(calculate_statistics(100, &flags), stats(100, 50, 25, 0));
}

#[test]
fn test_stats_partial_row() {
    let flags = OrientationFlags::default();
    // Sides (1,-) (2,-) (3,6) (4,5)
    assert_eq!(calculate_statistics(6, &flags), stats(6, 4, 2, 2));
    // Three half-empty sides, then five full ones
    assert_eq!(calculate_statistics(13, &flags), stats(13, 8, 4, 3));
}

#[test]
fn test_stats_ignore_orientation() {
    let plain = calculate_statistics(13, &OrientationFlags::default());
    let flags = OrientationFlags {
        rotate_all_pairs: true,
        rotate_alternate_pairs: true,
        flip_horizontal_on_back: true,
        flip_vertical_on_back: true,
    };
    assert_eq!(calculate_statistics(13, &flags), plain);
}

#[test]
fn test_stats_for_plan_matches_plan() {
    let flags = OrientationFlags::default();
    for total in [1, 5, 9, 33] {
        let sequence = plan(total, &flags);
        let result = statistics_for_plan(total, &sequence);
        assert_eq!(result.sheet_sides, sequence.len());
        assert_eq!(result.sheets, sequence.len().div_ceil(2));
        // Every slot is either a page or blank
        assert_eq!(result.sheet_sides * 2, total + result.blank_slots);
    }
}
