//! Decoding and encoding between byte streams and pixel buffers
//!
//! The pipeline accepts JPEG and PNG containers on input. Output artifacts
//! are JPEG (the reference configuration) or PNG; JPEG has no alpha channel,
//! so encoding to it drops alpha deterministically by converting to RGB.

use crate::error::PipelineError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Container format detected on a decoded input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Conventional file extension for this format (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "jpg",
            SourceFormat::Png => "png",
        }
    }
}

/// Target format for [`encode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeFormat {
    Jpeg,
    Png,
}

/// Decode an encoded image into an RGBA pixel buffer
///
/// # Arguments
/// * `bytes` - Encoded image bytes (JPEG or PNG container)
///
/// # Returns
/// The decoded buffer, whose dimensions exactly match the container's
/// declared dimensions, and the detected source format.
///
/// # Errors
/// * `UnsupportedFormat` if the container's format tag is recognized but not
///   in the supported set
/// * `CorruptInput` if the bytes cannot be parsed at all
pub fn decode(bytes: &[u8]) -> Result<(RgbaImage, SourceFormat), PipelineError> {
    let format = image::guess_format(bytes)
        .map_err(|e| PipelineError::CorruptInput(e.to_string()))?;

    let (format, source) = match format {
        ImageFormat::Jpeg => (ImageFormat::Jpeg, SourceFormat::Jpeg),
        ImageFormat::Png => (ImageFormat::Png, SourceFormat::Png),
        other => {
            return Err(PipelineError::UnsupportedFormat(format!(
                "{} input is not supported (expected jpeg or png)",
                other.extensions_str().first().copied().unwrap_or("unknown")
            )));
        }
    };

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PipelineError::CorruptInput(e.to_string()))?;

    Ok((img.to_rgba8(), source))
}

/// Encode a pixel buffer to the requested container format
///
/// JPEG output carries no alpha channel: the buffer is converted to RGB
/// first, so alpha is dropped the same way on every call. PNG output keeps
/// all four channels.
///
/// # Errors
/// `EncodeFailure` if the underlying encoder reports an error.
pub fn encode(img: &RgbaImage, format: EncodeFormat) -> Result<Vec<u8>, PipelineError> {
    let mut out = Vec::new();

    match format {
        EncodeFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            JpegEncoder::new(&mut out)
                .encode_image(&rgb)
                .map_err(|e| PipelineError::EncodeFailure(e.to_string()))?;
        }
        EncodeFormat::Png => {
            img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
                .map_err(|e| PipelineError::EncodeFailure(e.to_string()))?;
        }
    }

    Ok(out)
}
