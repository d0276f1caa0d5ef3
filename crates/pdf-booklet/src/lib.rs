pub mod booklet;
mod compose;
mod constants;
pub mod layout;
mod options;
mod preview;
mod rasterize;
pub mod render;
mod report;
mod stats;
mod types;

pub use booklet::{
    BookletProgress, BookletStage, count_pages, create_booklet, create_booklet_blocking,
    create_booklet_with_progress, load_pdf,
};
pub use compose::{BACKGROUND, compose, to_portrait};
pub use constants::*;
pub use layout::{is_back_side, plan};
pub use options::*;
pub use preview::PreviewWriter;
pub use rasterize::*;
pub use report::*;
pub use stats::{calculate_statistics, statistics_for_plan};
pub use types::*;
