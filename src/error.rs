use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Bad or missing user input. Reported before anything on disk is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("could not convert '{0}' to a number")]
    NotANumber(String),

    #[error("Percentage must be between 1 and 100")]
    OutOfRange(f64),

    #[error("Please select a folder first.")]
    MissingFolder,
}

/// Failure of a single image. Logged, then the batch moves on.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("target size {width}x{height} has a zero dimension")]
    EmptyTarget { width: u32, height: u32 },

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Failures that stop the whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot read folder {path}: {source}")]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot read folder {path}: not a directory")]
    NotAFolder { path: PathBuf },

    #[error("cannot create output folder {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
