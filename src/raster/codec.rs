//! Decoding and encoding rasters.
//!
//! The rotation core only ever sees an [`RgbImage`]. Getting one from disk
//! and writing one back is the job of a [`RasterCodec`]. The production
//! implementation, [`ImageCodec`], is a thin layer over the `image` crate:
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (format sniffed from content) | `ImageReader::with_guessed_format` + `decode` |
//! | Drop alpha / widen grey | `DynamicImage::to_rgb8` |
//! | Encode JPEG | `JpegEncoder::new_with_quality` |
//! | Encode PNG, TIFF, WebP, BMP | `ImageBuffer::save_with_format` |
//!
//! The output format is always inferred from the output path's extension.

use super::params::EncodeParams;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Decoded image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Output extensions and the encoder each one selects.
const OUTPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("bmp", ImageFormat::Bmp),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    OUTPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.writing_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Extensions that have a working encoder compiled in.
pub fn supported_output_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Resolve the encoder for `path` from its extension (case-insensitive).
pub fn output_format(path: &Path) -> Result<ImageFormat, CodecError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    OUTPUT_CANDIDATES
        .iter()
        .find(|(candidate, fmt)| *candidate == ext && fmt.writing_enabled())
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| {
            if ext.is_empty() {
                CodecError::UnsupportedFormat(format!("{} has no extension", path.display()))
            } else {
                CodecError::UnsupportedFormat(ext)
            }
        })
}

/// Short lowercase name for a format, as shown in reports.
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Tiff => "tiff",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        _ => "other",
    }
}

/// Something that can turn files into rasters and back.
///
/// `Sync` so a single codec can be shared by parallel jobs.
pub trait RasterCodec: Sync {
    /// Decode `path` into an RGB raster with non-zero dimensions.
    fn decode(&self, path: &Path) -> Result<RgbImage, CodecError>;

    /// Encode `image` to `params.output`, choosing the format from its extension.
    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), CodecError>;
}

/// [`RasterCodec`] backed by the `image` crate.
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<(), CodecError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    JpegEncoder::new_with_quality(writer, quality)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| CodecError::Encode(format!("{}: {}", path.display(), e)))
}

impl RasterCodec for ImageCodec {
    fn decode(&self, path: &Path) -> Result<RgbImage, CodecError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| CodecError::Decode(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), color = ?decoded.color(), "decoded input");

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(CodecError::EmptyImage { width, height });
        }
        Ok(rgb)
    }

    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), CodecError> {
        let format = output_format(&params.output)?;
        debug!(path = %params.output.display(), format = format_name(format), "encoding output");

        match format {
            ImageFormat::Jpeg => save_jpeg(image, &params.output, params.quality.value() as u8),
            other => image.save_with_format(&params.output, other).map_err(|e| {
                CodecError::Encode(format!("{}: {}", params.output.display(), e))
            }),
        }
    }
}
