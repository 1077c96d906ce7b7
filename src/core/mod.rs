//! Core copy logic.
//!
//! This module contains:
//! - Copy: Sequential copy of selected clips with per-file outcomes
//! - Report: Plain-text log of a copy run

pub mod copy;
pub mod report;

// Re-export commonly used types
pub use copy::{copy_clips, CopyError, CopyFailure, CopyResult, CopySuccess, FileCopyError};
pub use report::{
    render_report, report_file_name, write_report, write_report_at, ReportError,
    MAX_REPORT_ATTEMPTS,
};
