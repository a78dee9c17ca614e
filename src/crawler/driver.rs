//! Harvest driver
//!
//! Walks each configured letter in turn, one at a time, and stitches the
//! per-letter results into a single ordered word list.

use crate::classify::FilterConfig;
use crate::config::HarvestConfig;
use crate::crawler::progress::{percent_complete, Progress};
use crate::crawler::walker::{walk_letter, LetterOutcome, TokenTally, Walker};
use crate::HoardError;
use chrono::{DateTime, Utc};

/// Default letter sequence: a through z without `w`.
///
/// The listing this tool was first written against was walked without `w`.
/// That omission is kept as-is and may be an upstream bug; add `'w'` through
/// `[harvest] letters` to include it.
pub const LETTERS: [char; 25] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'x', 'y', 'z',
];

/// Result of a full harvest
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Accepted words from every letter, in letter order
    pub words: Vec<String>,

    /// One outcome per walked letter, in walk order
    pub letters: Vec<LetterOutcome>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl HarvestReport {
    /// Letters whose walk failed
    pub fn failures(&self) -> impl Iterator<Item = &LetterOutcome> {
        self.letters.iter().filter(|outcome| !outcome.is_completed())
    }

    /// True when every letter completed
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Total pages processed across letters
    pub fn total_pages(&self) -> u64 {
        self.letters.iter().map(|o| o.pages() as u64).sum()
    }

    /// Token counts summed across letters
    pub fn tally(&self) -> TokenTally {
        let mut total = TokenTally::default();
        for outcome in &self.letters {
            total.merge(outcome.tally());
        }
        total
    }

    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Walks every letter in `harvest.letters` sequentially
///
/// Progress is reported after each letter. With `fail_fast` the first
/// failed letter aborts the run with [`HoardError::LetterFailed`], which
/// carries the partial report gathered so far; otherwise the failure is
/// recorded in the report and the run continues.
pub async fn run_harvest(
    walker: &Walker,
    harvest: &HarvestConfig,
    filter: &FilterConfig,
    progress: &mut dyn Progress,
) -> Result<HarvestReport, HoardError> {
    let started_at = Utc::now();
    let total = harvest.letters.len();
    let mut letters = Vec::with_capacity(total);
    let mut words = Vec::new();

    progress.begin(total);

    for (i, &letter) in harvest.letters.iter().enumerate() {
        tracing::info!("Walking letter '{}'", letter);
        let outcome = walk_letter(walker, letter, filter).await;

        words.extend_from_slice(outcome.words());
        progress.letter_done(letter, percent_complete(i + 1, total), outcome.words().len());

        let abort = match outcome.failure() {
            Some((page, reason)) if harvest.fail_fast => Some((page, reason.clone())),
            _ => None,
        };
        letters.push(outcome);

        if let Some((page, reason)) = abort {
            tracing::error!("Aborting harvest: letter '{}' failed", letter);
            progress.finish();
            return Err(HoardError::LetterFailed {
                letter,
                page,
                reason,
                partial: Box::new(HarvestReport {
                    words,
                    letters,
                    started_at,
                    finished_at: Utc::now(),
                }),
            });
        }
    }

    progress.finish();

    let report = HarvestReport {
        words,
        letters,
        started_at,
        finished_at: Utc::now(),
    };

    tracing::info!(
        "Harvest finished: {} words from {} pages",
        report.words.len(),
        report.total_pages()
    );

    Ok(report)
}
