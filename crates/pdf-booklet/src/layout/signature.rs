//! Booklet page ordering
//!
//! Maps source page numbers onto printed sheet sides for a 4-up signature.
//! The sequence alternates front and back: sheet `k` is printed with
//! `sequence[2k]` on the front and `sequence[2k + 1]` on the back.
//!
//! **4 pages, no flags:** `[(1, 4), (2, 3)]`
//!
//! **8 pages, no flags:** `[(1, 8), (2, 7), (3, 6), (4, 5)]`

use crate::types::{OrientationFlags, SheetSidePair};

use super::SlotGrid;

/// Compute the imposition sequence for `total_pages` source pages.
///
/// `rotate_all_pairs` swaps left and right on every side. Otherwise
/// `rotate_alternate_pairs` swaps them on every second side (odd indices).
/// When both are set `rotate_all_pairs` wins. Sides with no page at all are
/// dropped, so every returned pair holds at least one page.
pub fn plan(total_pages: usize, flags: &OrientationFlags) -> Vec<SheetSidePair> {
    let slots = SlotGrid::fill(total_pages).flatten();

    let mut pairs: Vec<SheetSidePair> = slots
        .chunks_exact(2)
        .map(|chunk| SheetSidePair::new(chunk[0], chunk[1]))
        .collect();

    if flags.rotate_all_pairs {
        for pair in pairs.iter_mut() {
            *pair = pair.swapped();
        }
    } else if flags.rotate_alternate_pairs {
        for pair in pairs.iter_mut().skip(1).step_by(2) {
            *pair = pair.swapped();
        }
    }

    pairs.retain(|pair| !pair.is_blank());
    pairs
}

/// Whether the side at `index` in a sequence is printed on the back of its sheet
#[inline]
pub fn is_back_side(index: usize) -> bool {
    index % 2 == 1
}

// =============================================================================
// Tests
// =============================================================================
