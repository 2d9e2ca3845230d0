use image::imageops::FilterType;
use image::io::Reader;
use image::GenericImageView;
use std::fs;
use std::path::Path;

use crate::discover::ImageEntry;
use crate::error::ItemError;

/// What happened to one successfully resized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    pub original: (u32, u32),
    pub resized: (u32, u32),
    pub bytes_written: u64,
}

/// Scales both dimensions by `percent / 100`, rounding down.
pub fn target_dimensions(width: u32, height: u32, percent: f64) -> (u32, u32) {
    let scale = |side: u32| (f64::from(side) * percent / 100.0).floor() as u32;
    (scale(width), scale(height))
}

/// Decodes `entry`, resamples it with Lanczos3 and writes it into `output_dir`
/// under the same file name, replacing any previous output.
pub fn process_single_image(
    entry: &ImageEntry,
    percent: f64,
    output_dir: &Path,
) -> Result<ResizedImage, ItemError> {
    // Sniff the content, a mislabelled extension should still decode
    let img = Reader::open(&entry.path)?.with_guessed_format()?.decode()?;
    let (width, height) = img.dimensions();

    let (new_width, new_height) = target_dimensions(width, height, percent);
    if new_width == 0 || new_height == 0 {
        return Err(ItemError::EmptyTarget {
            width: new_width,
            height: new_height,
        });
    }

    let resized = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    drop(img);

    let data = entry.format.encode(&resized)?;

    let output_path = output_dir.join(entry.path.file_name().unwrap_or_default());
    fs::write(&output_path, &data)?;

    Ok(ResizedImage {
        original: (width, height),
        resized: (new_width, new_height),
        bytes_written: data.len() as u64,
    })
}
