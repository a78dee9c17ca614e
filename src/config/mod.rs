//! Configuration module for Wordhoard
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wordhoard::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wordhoard.toml")).unwrap();
//! println!("Walking {} letters", config.harvest.letters.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HarvestConfig, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
