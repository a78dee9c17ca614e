//! Wordhoard main entry point
//!
//! This is the command-line interface for the Wordhoard dictionary harvester.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wordhoard::config::{load_config_with_hash, validate, Config};
use wordhoard::crawler::{harvest, LogProgress};
use wordhoard::HoardError;
use wordhoard::output::{
    generate_markdown_summary, print_statistics, write_word_list, HarvestStatistics,
    SummaryContext,
};

/// Wordhoard: a dictionary browse-list harvester
///
/// Wordhoard walks a dictionary's alphabetical browse pages, keeps the
/// entries that look like plain words, and prints them one per line.
#[derive(Parser, Debug)]
#[command(name = "wordhoard")]
#[command(version)]
#[command(about = "Harvest a filtered word list from a dictionary's browse pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Keep hyphenated entries (mother-in-law)
    #[arg(long)]
    include_hyphenated: bool,

    /// Keep capitalized entries (Paris)
    #[arg(long)]
    include_proper: bool,

    /// Keep multi-word entries (hello world)
    #[arg(long)]
    include_phrases: bool,

    /// Keep prefix entries (pre-)
    #[arg(long)]
    include_prefixes: bool,

    /// Keep suffix entries (-ing)
    #[arg(long)]
    include_suffixes: bool,

    /// Keep acronym entries (U.S.A., a.m.)
    #[arg(long)]
    include_acronyms: bool,

    /// Letters to walk, e.g. "abc" (defaults to a-z without w)
    #[arg(long, value_name = "LETTERS")]
    letters: Option<String>,

    /// Write the word list here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a markdown run summary here
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Record failed letters and continue instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Validate config and show what would be walked without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, Some(hash))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli);
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, config_hash, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordhoard=info,warn"),
            1 => EnvFilter::new("wordhoard=debug,info"),
            2 => EnvFilter::new("wordhoard=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so the word list can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Folds command-line flags into the loaded configuration
///
/// Filter flags can only switch a shape on; they never turn off what the
/// config file enabled.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    let filter = &mut config.filter;
    filter.include_hyphenated |= cli.include_hyphenated;
    filter.include_proper |= cli.include_proper;
    filter.include_phrases |= cli.include_phrases;
    filter.include_prefixes |= cli.include_prefixes;
    filter.include_suffixes |= cli.include_suffixes;
    filter.include_acronyms |= cli.include_acronyms;

    if let Some(letters) = &cli.letters {
        config.harvest.letters = letters.chars().collect();
    }
    if cli.keep_going {
        config.harvest.fail_fast = false;
    }
    if let Some(path) = &cli.output {
        config.output.words_path = Some(path.display().to_string());
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }
}

/// Handles the --dry-run mode: shows what would be walked
fn handle_dry_run(config: &Config) {
    println!("=== Wordhoard Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Browse path: {}", config.site.browse_path);
    println!("  Entries selector: {}", config.site.entries_selector);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nHarvest:");
    let letters: String = config.harvest.letters.iter().collect();
    println!("  Letters ({}): {}", config.harvest.letters.len(), letters);
    println!("  Request delay: {}ms", config.harvest.request_delay_ms);
    match config.harvest.max_pages_per_letter {
        Some(max) => println!("  Max pages per letter: {}", max),
        None => println!("  Max pages per letter: unlimited"),
    }
    println!("  Respect robots.txt: {}", config.harvest.respect_robots);
    println!("  Fail fast: {}", config.harvest.fail_fast);

    let f = &config.filter;
    println!("\nFilter (included shapes):");
    println!("  Hyphenated: {}", f.include_hyphenated);
    println!("  Proper nouns: {}", f.include_proper);
    println!("  Phrases: {}", f.include_phrases);
    println!("  Prefixes: {}", f.include_prefixes);
    println!("  Suffixes: {}", f.include_suffixes);
    println!("  Acronyms: {}", f.include_acronyms);

    println!("\nOutput:");
    println!(
        "  Words: {}",
        config.output.words_path.as_deref().unwrap_or("<stdout>")
    );
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    config_hash: Option<String>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Harvesting {} from {} letters",
        config.site.base_url,
        config.harvest.letters.len()
    );

    let report = match harvest(&config, &mut LogProgress).await {
        Ok(report) => report,
        Err(HoardError::LetterFailed {
            letter,
            page,
            reason,
            partial,
        }) => {
            tracing::error!("Harvest failed on letter '{}': {}", letter, reason);
            write_word_list(
                &partial.words,
                config.output.words_path.as_deref().map(Path::new),
            )?;
            tracing::warn!(
                "Wrote {} words gathered before the failure",
                partial.words.len()
            );
            return Err(HoardError::LetterFailed {
                letter,
                page,
                reason,
                partial,
            }
            .into());
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    write_word_list(
        &report.words,
        config.output.words_path.as_deref().map(Path::new),
    )?;

    if let Some(path) = &config.output.summary_path {
        let context = SummaryContext {
            base_url: config.site.base_url.clone(),
            filter: config.filter,
            config_hash,
        };
        generate_markdown_summary(&report, &context, Path::new(path))?;
        tracing::info!("Summary written to: {}", path);
    }

    if !quiet {
        print_statistics(&HarvestStatistics::from_report(&report));
    }

    if !report.is_complete() {
        tracing::warn!(
            "{} letter(s) failed; the word list is partial",
            report.failures().count()
        );
    }

    Ok(())
}
