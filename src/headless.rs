use batch_image_resizer::{batch, BatchOutcome, BatchReporter};
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "[{elapsed_precise}] ▕{bar:40.blue}▏{percent:>3}% {msg}";

/// Prints log lines above a percentage bar.
struct TerminalReporter {
    bar: ProgressBar,
}

impl TerminalReporter {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░  "));
        }
        Self { bar }
    }
}

impl BatchReporter for TerminalReporter {
    fn on_start(&mut self, total: usize) {
        self.bar.set_message(format!("{} images", total));
    }

    fn on_log(&mut self, line: &str) {
        self.bar.suspend(|| println!("{}", line));
    }

    fn on_progress(&mut self, percent: f32) {
        self.bar.set_position(percent.round() as u64);
    }
}

/// Runs one batch in the terminal and maps the outcome to an exit code.
pub fn run(folder: &str, percent: &str) -> i32 {
    let mut reporter = TerminalReporter::new();
    let outcome = batch::run(folder, percent, &mut reporter);
    reporter.bar.finish_and_clear();

    exit_code(&outcome)
}

/// 0 when nothing failed, 1 when some images failed, 2 when the run never started.
fn exit_code(outcome: &BatchOutcome) -> i32 {
    match outcome {
        BatchOutcome::Invalid(_) | BatchOutcome::Aborted(_) => 2,
        done if done.is_clean() => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_image_resizer::{BatchError, BatchSummary, FailedImage, ValidationError};
    use std::path::PathBuf;

    fn completed(failed: Vec<FailedImage>) -> BatchOutcome {
        BatchOutcome::Completed(BatchSummary {
            output_dir: PathBuf::from("pics/resized"),
            total: 2,
            succeeded: 2 - failed.len(),
            failed,
        })
    }

    #[test]
    fn clean_runs_exit_zero() {
        assert_eq!(exit_code(&BatchOutcome::NoImages), 0);
        assert_eq!(exit_code(&completed(Vec::new())), 0);
    }

    #[test]
    fn failed_images_exit_one() {
        let failed = vec![FailedImage {
            filename: "b.jpg".into(),
            message: "bad data".into(),
        }];
        assert_eq!(exit_code(&completed(failed)), 1);
    }

    #[test]
    fn rejected_or_aborted_runs_exit_two() {
        let invalid = BatchOutcome::Invalid(ValidationError::OutOfRange(0.0));
        assert_eq!(exit_code(&invalid), 2);

        let aborted = BatchOutcome::Aborted(BatchError::NotAFolder {
            path: PathBuf::from("pic.png"),
        });
        assert_eq!(exit_code(&aborted), 2);
    }
}
