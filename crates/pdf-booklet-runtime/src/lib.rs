use std::path::PathBuf;

mod worker;

pub use worker::worker_task;

// Re-export types from the library crate
pub use pdf_booklet::{
    BookletOptions, BookletRequest, BookletResponse, BookletStatistics, OrientationFlags,
};

/// Commands sent from a front end to the worker
#[derive(Debug, Clone, PartialEq)]
pub enum BookletCommand {
    Create {
        request: BookletRequest,
    },
    CalculateStats {
        input_path: PathBuf,
        flags: OrientationFlags,
    },
    LoadOptions {
        path: PathBuf,
    },
}

/// Updates sent from the worker back to the front end
#[derive(Debug, Clone, PartialEq)]
pub enum BookletUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    /// Finished booklet run, successful or not
    Created {
        response: BookletResponse,
    },
    StatsCalculated {
        stats: BookletStatistics,
    },
    OptionsLoaded {
        options: BookletOptions,
    },
    Error {
        message: String,
    },
}
