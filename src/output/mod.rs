//! Output module for harvest results
//!
//! This module handles:
//! - Writing the final word list
//! - Summarizing a run as statistics
//! - Rendering a markdown run summary

mod markdown;
pub mod stats;
mod wordlist;

pub use markdown::{format_markdown_summary, generate_markdown_summary, SummaryContext};
pub use stats::{print_statistics, HarvestStatistics, LetterStatistics};
pub use wordlist::{format_word_list, write_word_list};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
