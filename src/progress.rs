// src/progress.rs

//! Defines a trait for reporting progress of long-running walks.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// A trait for reporting walk progress, abstracting over specific
/// implementations like `indicatif`.
///
/// The pipeline sizes it to the number of dropped roots and completes it
/// when the walk finishes; messages carry the stage currently running.
pub trait ProgressReporter: Send + Sync {
    /// Sets the total number of roots to walk.
    fn set_length(&self, len: u64);
    /// Sets how many roots have completed.
    fn set_position(&self, pos: u64);
    /// Sets a descriptive message for the current operation (e.g., "Expanding demo.zip").
    fn set_message(&self, msg: String);
    /// Finishes the progress reporting, hiding the indicator.
    fn finish(&self);
    /// Finishes the progress reporting with a final message.
    fn finish_with_message(&self, msg: String);
}

/// A `ProgressReporter` that does nothing.
///
/// Used in non-interactive environments and as the library default.
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn set_length(&self, _len: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self) {}
    fn finish_with_message(&self, _msg: String) {}
}

/// An implementation of `ProgressReporter` using the `indicatif` crate.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    /// Creates a new progress bar sized for root-by-root walks.
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} roots {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Self { bar: pb }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_progress_is_inert() {
        let reporter = NoOpProgress;
        reporter.set_length(3);
        reporter.set_position(1);
        reporter.set_message("walking".to_string());
        reporter.finish();
    }
}
