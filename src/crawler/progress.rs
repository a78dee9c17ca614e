//! Progress reporting
//!
//! The driver reports after each letter; frontends decide how to show it.

/// Progress reporting for a harvest run.
///
/// Frontends implement this to surface status; every method has a no-op
/// default.
pub trait Progress {
    /// Called once before the first letter with the number of letters.
    fn begin(&mut self, _total: usize) {}

    /// Called after each letter finishes, whether it completed or failed.
    ///
    /// `percent` is the rounded share of letters done so far (0-100).
    fn letter_done(&mut self, _letter: char, _percent: u8, _accepted: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Logs each finished letter through `tracing`.
pub struct LogProgress;

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        tracing::info!("Walking {} letters", total);
    }

    fn letter_done(&mut self, letter: char, percent: u8, accepted: usize) {
        tracing::info!("[{:>3}%] letter '{}': {} words", percent, letter, accepted);
    }
}

/// Rounded percentage of `done` out of `total`
pub fn percent_complete(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}
