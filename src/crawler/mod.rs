//! Crawler module for browse-page walking
//!
//! This module contains the harvesting logic, including:
//! - HTTP fetching with optional retry
//! - Browse page parsing (entry tokens and links)
//! - Per-letter pagination
//! - Sequential letter driver with progress reporting

mod driver;
mod fetcher;
mod parser;
mod progress;
mod walker;

pub use driver::{run_harvest, HarvestReport, LETTERS};
pub use fetcher::{build_http_client, fetch_page, fetch_with_retry, FetchResult};
pub use parser::{parse_browse_page, BrowsePage};
pub use progress::{percent_complete, LogProgress, NullProgress, Progress};
pub use walker::{
    browse_path, find_next_page, walk_letter, LetterOutcome, TokenTally, WalkFailure, Walker,
};

use crate::config::Config;
use crate::HoardError;

/// Runs a complete harvest from configuration
///
/// Builds the client, loads robots.txt when enabled, and walks every
/// configured letter.
///
/// # Arguments
///
/// * `config` - The harvester configuration
/// * `progress` - Receives per-letter progress
pub async fn harvest(
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<HarvestReport, HoardError> {
    let walker = Walker::connect(config).await?;
    run_harvest(&walker, &config.harvest, &config.filter, progress).await
}
