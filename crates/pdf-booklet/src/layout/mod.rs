//! Layout calculation modules for booklet imposition
//!
//! - Slot grid (which source page lands in which slot)
//! - Page ordering (sheet-side pairs in print order)
//! - Content placement (fitting and centering within a cell)

mod grid;
mod placement;
mod signature;

pub use grid::*;
pub use placement::*;
pub use signature::*;
