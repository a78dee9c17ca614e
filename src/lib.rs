//! Wordhoard: a dictionary browse-list harvester
//!
//! This crate walks an online dictionary's alphabetical browse listing page by
//! page, extracts entry strings, and filters them by lexical shape to build a
//! curated word list.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;

use thiserror::Error;

/// Main error type for Wordhoard operations
#[derive(Debug, Error)]
pub enum HoardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Letter '{letter}' failed on page {page}: {reason}")]
    LetterFailed {
        letter: char,
        page: u32,
        reason: crawler::WalkFailure,
        /// Everything gathered up to and including the failed letter
        partial: Box<crawler::HarvestReport>,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wordhoard operations
pub type Result<T> = std::result::Result<T, HoardError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use classify::{classify, should_include, FilterConfig, Rejection, Verdict};
pub use config::Config;
pub use crawler::{run_harvest, walk_letter, HarvestReport, LetterOutcome, Walker, LETTERS};
