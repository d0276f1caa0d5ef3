//! Slot grid for 4-up signature imposition
//!
//! Pages are dealt into a `rows × 4` grid: the ascending half of the booklet
//! runs down the even columns, the descending half climbs back up the odd
//! columns. Reading the grid row-major then yields sheet-side pairs.

/// Slots per grid row (two sheet sides of two pages each)
pub const GRID_COLUMNS: usize = 4;

/// A `rows × 4` grid of page slots (`None` = blank)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    rows: Vec<[Option<usize>; GRID_COLUMNS]>,
}

impl SlotGrid {
    /// Build the grid holding pages `1..=total_pages`
    pub fn fill(total_pages: usize) -> Self {
        let row_count = total_pages.div_ceil(GRID_COLUMNS);
        let mut rows = vec![[None; GRID_COLUMNS]; row_count];
        let mut pages = 1..=total_pages;

        // Ascending: columns 0 and 2, top row first
        let ascending = (0..row_count).flat_map(|row| [(row, 0), (row, 2)]);
        // Descending: columns 3 and 1, bottom row first
        let descending = (0..row_count).rev().flat_map(|row| [(row, 3), (row, 1)]);

        for ((row, col), page) in ascending.chain(descending).zip(&mut pages) {
            rows[row][col] = Some(page);
        }

        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.rows.get(row).and_then(|r| r.get(col).copied().flatten())
    }

    /// All slots in row-major order
    pub fn flatten(&self) -> Vec<Option<usize>> {
        self.rows.iter().flat_map(|row| row.iter().copied()).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
