use crate::layout::plan;
use crate::types::*;

/// Calculate statistics for a booklet of `total_pages` source pages
pub fn calculate_statistics(total_pages: usize, flags: &OrientationFlags) -> BookletStatistics {
    statistics_for_plan(total_pages, &plan(total_pages, flags))
}

/// Statistics for an already computed imposition sequence
pub fn statistics_for_plan(total_pages: usize, sequence: &[SheetSidePair]) -> BookletStatistics {
    let sheet_sides = sequence.len();

    BookletStatistics {
        source_pages: total_pages,
        sheet_sides,
        // Front and back share a sheet
        sheets: sheet_sides.div_ceil(2),
        blank_slots: sequence.iter().map(SheetSidePair::blank_slots).sum(),
    }
}
