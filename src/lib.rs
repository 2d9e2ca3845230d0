//! Batch resizing of PNG and JPEG images by a percentage.
//!
//! [`batch::run`] validates the raw folder/percent input, resizes every image
//! directly inside the folder into `<folder>/resized`, and reports log lines
//! and progress through a [`progress::BatchReporter`].

pub mod batch;
pub mod compression;
pub mod discover;
pub mod error;
pub mod progress;
pub mod resize;

pub use batch::{run, run_job, BatchOutcome, BatchSummary, FailedImage, Job};
pub use error::{BatchError, ItemError, ValidationError};
pub use progress::{BatchReporter, ProgressState, SilentReporter};
