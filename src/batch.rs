use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::discover::collect_images;
use crate::error::{BatchError, ValidationError};
use crate::progress::{BatchReporter, ProgressState};
use crate::resize::process_single_image;

/// Name of the subdirectory results are written to.
pub const OUTPUT_DIR_NAME: &str = "resized";

/// A validated request to resize every image in `source_folder`.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    source_folder: PathBuf,
    scale_percent: f64,
}

impl Job {
    /// Builds a job from raw form input. The percentage is checked first.
    pub fn parse(folder: &str, percent: &str) -> Result<Self, ValidationError> {
        let scale_percent = parse_percent(percent)?;

        let folder = folder.trim();
        if folder.is_empty() {
            return Err(ValidationError::MissingFolder);
        }

        Ok(Self {
            source_folder: PathBuf::from(folder),
            scale_percent,
        })
    }

    pub fn source_folder(&self) -> &Path {
        &self.source_folder
    }

    pub fn scale_percent(&self) -> f64 {
        self.scale_percent
    }

    pub fn output_dir(&self) -> PathBuf {
        output_dir_for(&self.source_folder)
    }
}

/// Where results for `folder` end up.
pub fn output_dir_for(folder: &Path) -> PathBuf {
    folder.join(OUTPUT_DIR_NAME)
}

fn parse_percent(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;

    // NaN fails the range check too
    if !(1.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange(value));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedImage {
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedImage>,
}

#[derive(Debug)]
pub enum BatchOutcome {
    Invalid(ValidationError),
    Aborted(BatchError),
    NoImages,
    Completed(BatchSummary),
}

impl BatchOutcome {
    /// Whether the run ended without any reported error.
    pub fn is_clean(&self) -> bool {
        match self {
            Self::NoImages => true,
            Self::Completed(summary) => summary.failed.is_empty(),
            Self::Invalid(_) | Self::Aborted(_) => false,
        }
    }
}

/// Validates the raw inputs and runs the batch, reporting every problem
/// through `reporter`.
pub fn run(folder: &str, percent: &str, reporter: &mut dyn BatchReporter) -> BatchOutcome {
    match Job::parse(folder, percent) {
        Ok(job) => run_job(&job, reporter),
        Err(e) => {
            warn!("rejected input: {}", e);
            reporter.on_log(&format!("Error: {}", e));
            BatchOutcome::Invalid(e)
        }
    }
}

/// Resizes every image of `job` one after the other.
///
/// A failing image is logged and skipped; progress counts attempted files.
pub fn run_job(job: &Job, reporter: &mut dyn BatchReporter) -> BatchOutcome {
    let images = match collect_images(job.source_folder()) {
        Ok(images) => images,
        Err(e) => return abort(e, reporter),
    };

    if images.is_empty() {
        info!("no images in {}", job.source_folder().display());
        reporter.on_log("No images found in the selected folder.");
        return BatchOutcome::NoImages;
    }

    let output_dir = job.output_dir();
    if let Err(source) = fs::create_dir_all(&output_dir) {
        return abort(
            BatchError::CreateOutputDir {
                path: output_dir,
                source,
            },
            reporter,
        );
    }

    info!(
        "resizing {} images in {} to {}%",
        images.len(),
        job.source_folder().display(),
        job.scale_percent()
    );
    reporter.on_start(images.len());

    let mut progress = ProgressState::new(images.len());
    let mut summary = BatchSummary {
        output_dir: output_dir.clone(),
        total: images.len(),
        succeeded: 0,
        failed: Vec::new(),
    };

    for entry in &images {
        let filename = entry.file_name();

        match process_single_image(entry, job.scale_percent(), &output_dir) {
            Ok(result) => {
                debug!(
                    "{}: {:?} -> {:?} as {}, {} bytes",
                    filename, result.original, result.resized, entry.format, result.bytes_written
                );
                reporter.on_log(&format!("Processed: {}", filename));
                summary.succeeded += 1;
            }
            Err(e) => {
                warn!("{} failed: {}", filename, e);
                reporter.on_log(&format!("Error processing {}: {}", filename, e));
                summary.failed.push(FailedImage {
                    filename,
                    message: e.to_string(),
                });
            }
        }

        progress.advance();
        reporter.on_progress(progress.percent());
    }

    info!(
        "batch done: {} of {} images resized, {} attempted",
        summary.succeeded,
        progress.total(),
        progress.processed()
    );
    reporter.on_log(&format!(
        "Processing complete! Resized images saved in: {}",
        output_dir.display()
    ));
    reporter.on_progress(100.0);

    BatchOutcome::Completed(summary)
}

fn abort(error: BatchError, reporter: &mut dyn BatchReporter) -> BatchOutcome {
    warn!("batch aborted: {}", error);
    reporter.on_log(&format!("Error: {}", error));
    BatchOutcome::Aborted(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentReporter;
    use tempfile::tempdir;

    #[test]
    fn parses_valid_input() {
        let job = Job::parse(" /tmp/pics ", " 50 ").unwrap();
        assert_eq!(job.source_folder(), Path::new("/tmp/pics"));
        assert_eq!(job.scale_percent(), 50.0);
        assert_eq!(job.output_dir(), Path::new("/tmp/pics/resized"));
    }

    #[test]
    fn percent_bounds_are_inclusive() {
        assert!(Job::parse("x", "1").is_ok());
        assert!(Job::parse("x", "100").is_ok());
        assert!(Job::parse("x", "12.5").is_ok());
        assert_eq!(
            Job::parse("x", "0.99"),
            Err(ValidationError::OutOfRange(0.99))
        );
        assert_eq!(
            Job::parse("x", "100.5"),
            Err(ValidationError::OutOfRange(100.5))
        );
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            Job::parse("x", "fifty"),
            Err(ValidationError::NotANumber("fifty".into()))
        );
        assert_eq!(
            Job::parse("x", ""),
            Err(ValidationError::NotANumber(String::new()))
        );
        assert!(matches!(
            Job::parse("x", "NaN"),
            Err(ValidationError::OutOfRange(_))
        ));
    }

    #[test]
    fn percent_is_checked_before_folder() {
        assert_eq!(
            Job::parse("", "abc"),
            Err(ValidationError::NotANumber("abc".into()))
        );
        assert_eq!(Job::parse("  ", "50"), Err(ValidationError::MissingFolder));
    }

    #[test]
    fn only_failure_free_outcomes_are_clean() {
        assert!(BatchOutcome::NoImages.is_clean());
        assert!(!BatchOutcome::Invalid(ValidationError::MissingFolder).is_clean());

        let mut summary = BatchSummary {
            output_dir: PathBuf::from("out"),
            total: 2,
            succeeded: 2,
            failed: Vec::new(),
        };
        assert!(BatchOutcome::Completed(summary.clone()).is_clean());

        summary.succeeded = 1;
        summary.failed.push(FailedImage {
            filename: "a.png".into(),
            message: "bad".into(),
        });
        assert!(!BatchOutcome::Completed(summary).is_clean());
    }

    #[test]
    fn empty_folder_has_no_images() {
        let dir = tempdir().unwrap();
        let job = Job::parse(&dir.path().display().to_string(), "50").unwrap();

        let outcome = run_job(&job, &mut SilentReporter);
        assert!(matches!(outcome, BatchOutcome::NoImages));
        assert!(!job.output_dir().exists());
    }
}
