//! In-place platform conversion module
//!
//! Rewrites replicated rule lists into Egern or sing-box rule sets and drops
//! a readme with the published download links next to each converted file.

pub mod batch;
pub mod engine;

pub use batch::{collect_files, convert_batch, BatchSummary};
pub use engine::{convert_file, ConvertOptions, ConvertedFile, Platform};

/// Message printed after a convert command finishes
pub const COMPLETION_MESSAGE: &str = "Processed Completed.";
