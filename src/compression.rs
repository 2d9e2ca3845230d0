// compression.rs - output encoders for resized images

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;
use std::io::Cursor;

/// Quality used for every JPEG we write.
pub const JPEG_QUALITY: u8 = 95;

/// Encoding of a resized image, chosen from the source file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Encodes `image` into an in-memory buffer.
    pub fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
        match self {
            Self::Jpeg => encode_jpeg(image, JPEG_QUALITY),
            Self::Png => encode_png(image),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG (quality {})", JPEG_QUALITY),
            Self::Png => write!(f, "PNG (optimized)"),
        }
    }
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)?;

    Ok(buffer.into_inner())
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);
    image.write_with_encoder(encoder)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 8, |x, y| {
            Rgba([(x * 16) as u8, (y * 32) as u8, 128, 200])
        }))
    }

    #[test]
    fn jpeg_output_is_jpeg_without_alpha() {
        let bytes = OutputFormat::Jpeg.encode(&sample()).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn png_output_keeps_alpha() {
        let bytes = OutputFormat::Png.encode(&sample()).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), sample().to_rgba8());
    }

    #[test]
    fn jpeg_is_written_at_quality_95() {
        let noisy = DynamicImage::ImageRgb8(image::RgbImage::from_fn(64, 64, |x, y| {
            image::Rgb([((x * 7 + y * 13) % 256) as u8, ((x * y) % 256) as u8, (x ^ y) as u8])
        }));
        let written = OutputFormat::Jpeg.encode(&noisy).unwrap();
        assert_eq!(written, encode_jpeg(&noisy, 95).unwrap());

        let low = encode_jpeg(&noisy, 20).unwrap();
        assert!(low.len() < written.len());
    }
}
