/// Receives the user-facing output of a batch.
///
/// The window implements this by forwarding events to the UI, the terminal
/// implementation prints lines and drives a progress bar.
pub trait BatchReporter {
    /// Called once before the first image, with the number of images found.
    fn on_start(&mut self, _total: usize) {}
    fn on_log(&mut self, line: &str);
    /// Overall progress in percent, `0.0..=100.0`.
    fn on_progress(&mut self, percent: f32);
}

/// Reporter that discards everything.
pub struct SilentReporter;

impl BatchReporter for SilentReporter {
    fn on_log(&mut self, _line: &str) {}
    fn on_progress(&mut self, _percent: f32) {}
}

/// Files attempted so far out of the files found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    processed: usize,
    total: usize,
}

impl ProgressState {
    pub fn new(total: usize) -> Self {
        Self { processed: 0, total }
    }

    /// Counts one more attempted file, saturating at `total`.
    pub fn advance(&mut self) {
        self.processed = (self.processed + 1).min(self.total);
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f32 / self.total as f32 * 100.0
    }
}
