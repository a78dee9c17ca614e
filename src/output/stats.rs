//! Statistics derived from a harvest report
//!
//! This module condenses a [`HarvestReport`] into per-letter and overall
//! counts, and prints them for the terminal.

use crate::classify::Rejection;
use crate::crawler::HarvestReport;
use std::collections::BTreeMap;

/// Counts for one letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterStatistics {
    pub letter: char,
    pub pages: u32,
    pub tokens_seen: u64,
    pub accepted: u64,
    /// Failure description, if the letter did not complete
    pub failure: Option<String>,
}

/// Harvest statistics summary
#[derive(Debug, Clone, Default)]
pub struct HarvestStatistics {
    /// Per-letter rows in walk order
    pub letters: Vec<LetterStatistics>,

    pub total_pages: u64,
    pub tokens_seen: u64,
    pub accepted: u64,

    /// Rejected tokens by first failing rule
    pub rejected_by_reason: BTreeMap<Rejection, u64>,

    pub failed_letters: usize,
}

impl HarvestStatistics {
    /// Builds statistics from a finished report
    pub fn from_report(report: &HarvestReport) -> Self {
        let letters: Vec<LetterStatistics> = report
            .letters
            .iter()
            .map(|outcome| LetterStatistics {
                letter: outcome.letter(),
                pages: outcome.pages(),
                tokens_seen: outcome.tally().seen,
                accepted: outcome.words().len() as u64,
                failure: outcome
                    .failure()
                    .map(|(page, reason)| format!("page {}: {}", page, reason)),
            })
            .collect();

        let tally = report.tally();

        Self {
            total_pages: report.total_pages(),
            tokens_seen: tally.seen,
            accepted: report.words.len() as u64,
            rejected_by_reason: tally.rejected,
            failed_letters: letters.iter().filter(|l| l.failure.is_some()).count(),
            letters,
        }
    }

    /// Share of seen tokens that were accepted, in percent
    pub fn acceptance_rate(&self) -> f64 {
        if self.tokens_seen == 0 {
            0.0
        } else {
            (self.accepted as f64 / self.tokens_seen as f64) * 100.0
        }
    }
}

/// Prints statistics to stderr
///
/// Stdout is reserved for the word list itself.
pub fn print_statistics(stats: &HarvestStatistics) {
    eprintln!("=== Harvest Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Letters walked: {}", stats.letters.len());
    eprintln!("  Pages fetched: {}", stats.total_pages);
    eprintln!("  Tokens seen: {}", stats.tokens_seen);
    eprintln!(
        "  Words kept: {} ({:.1}%)",
        stats.accepted,
        stats.acceptance_rate()
    );
    eprintln!();

    if !stats.rejected_by_reason.is_empty() {
        eprintln!("Rejected:");
        let mut reasons: Vec<_> = stats.rejected_by_reason.iter().collect();
        reasons.sort_by(|a, b| b.1.cmp(a.1));
        for (reason, count) in reasons {
            eprintln!("  {}: {}", reason, count);
        }
        eprintln!();
    }

    if stats.failed_letters > 0 {
        eprintln!("Failed Letters ({}):", stats.failed_letters);
        for row in &stats.letters {
            if let Some(failure) = &row.failure {
                eprintln!("  - {}: {}", row.letter, failure);
            }
        }
        eprintln!();
    }
}
