use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::compression::OutputFormat;
use crate::error::BatchError;

/// An image found directly inside the source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl ImageEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Lists the png/jpg/jpeg files in `folder`, sorted by file name.
///
/// Only the top level is scanned, so a previous `resized` output folder is
/// never picked up as input.
pub fn collect_images(folder: &Path) -> Result<Vec<ImageEntry>, BatchError> {
    let mut images = Vec::new();

    // A plain file as root would walk to nothing; missing paths fail in the walk
    if let Ok(meta) = fs::metadata(folder) {
        if !meta.is_dir() {
            return Err(BatchError::NotAFolder {
                path: folder.to_path_buf(),
            });
        }
    }

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(BatchError::ReadFolder {
                    path: folder.to_path_buf(),
                    source,
                });
            }
            // Broken links and unreadable entries inside the folder
            Err(e) => {
                warn!("skipping entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(format) = image_format(entry.path()) {
            images.push(ImageEntry {
                path: entry.into_path(),
                format,
            });
        }
    }

    Ok(images)
}

/// Maps an allowed extension to the format its output is written in.
pub fn image_format(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
        "png" => Some(OutputFormat::Png),
        _ => None,
    }
}
