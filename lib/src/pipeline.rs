//! Stage sequencing and per-stage timing
//!
//! One call to [`run`] processes one uploaded image: decode, then crop,
//! grayscale, thumbnail and ASCII stages in order, each producing an encoded
//! artifact wrapped in a [`StageResult`] with its elapsed wall-clock time.
//! Every invocation owns its buffers; nothing is shared across runs. A stage
//! failure aborts only that run and surfaces the specific error.

use crate::ascii;
use crate::codec::{self, EncodeFormat, SourceFormat};
use crate::config::PipelineConfig;
use crate::crop;
use crate::error::PipelineError;
use crate::grayscale;
use crate::resize;
use std::time::{Duration, Instant};

/// An artifact produced by one stage, plus the stage's elapsed time
#[derive(Debug, Clone)]
pub struct StageResult<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// The two crop artifacts, produced together in one timed stage
#[derive(Debug, Clone)]
pub struct CropArtifacts {
    /// JPEG bytes of the center crop
    pub center: Vec<u8>,
    /// JPEG bytes of the rectangular crop
    pub rect: Vec<u8>,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub crops: StageResult<CropArtifacts>,
    /// JPEG bytes of the grayscale derivative, same dimensions as the source
    pub grayscale: StageResult<Vec<u8>>,
    /// JPEG bytes of the thumbnail
    pub thumbnail: StageResult<Vec<u8>>,
    /// Newline-terminated ASCII rendering of the source
    pub ascii: StageResult<String>,
    /// Total elapsed time including the initial decode
    pub total: Duration,
}

/// Run a fallible stage and record its elapsed time
fn timed<T>(
    stage: impl FnOnce() -> Result<T, PipelineError>,
) -> Result<StageResult<T>, PipelineError> {
    let start = Instant::now();
    let value = stage()?;
    Ok(StageResult {
        value,
        elapsed: start.elapsed(),
    })
}

/// Run the full pipeline over one encoded input image
///
/// Stages run in a fixed order: crops, grayscale, thumbnail, ASCII. The
/// grayscale stage only accepts JPEG sources; handing it a PNG fails that
/// run with `UnsupportedFormat`. This is a deliberate restriction, not one
/// to be silently broadened.
///
/// # Arguments
/// * `bytes` - Encoded input image (JPEG or PNG)
/// * `config` - Fixed per-process configuration
///
/// # Errors
/// The first stage error aborts the run; completed stage artifacts are
/// dropped rather than returned as partial success.
pub fn run(bytes: &[u8], config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;

    let total_start = Instant::now();
    let (source, format) = codec::decode(bytes)?;

    let crops = timed(|| {
        let center = crop::center_crop(
            &source,
            config.center_crop_width,
            config.center_crop_height,
        );
        let rect = crop::rect_crop(&source, config.rect_crop)?;
        Ok(CropArtifacts {
            center: codec::encode(&center, EncodeFormat::Jpeg)?,
            rect: codec::encode(&rect, EncodeFormat::Jpeg)?,
        })
    })?;

    let grayscale = timed(|| {
        if format != SourceFormat::Jpeg {
            return Err(PipelineError::UnsupportedFormat(
                "only jpeg sources are supported by the grayscale stage".into(),
            ));
        }
        codec::encode(&grayscale::to_grayscale(&source), EncodeFormat::Jpeg)
    })?;

    let thumbnail = timed(|| {
        let small = resize::resize(
            &source,
            config.thumbnail_width,
            config.thumbnail_height,
            config.thumbnail_filter,
        )?;
        codec::encode(&small, EncodeFormat::Jpeg)
    })?;

    let ascii = timed(|| {
        let scaled = ascii::scale_for_glyph_grid(&source, config.ascii_cols)?;
        let (cols, rows) = scaled.dimensions();
        Ok(ascii::render(&scaled, cols, rows, &config.glyph_ramp))
    })?;

    Ok(PipelineOutput {
        crops,
        grayscale,
        thumbnail,
        ascii,
        total: total_start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
                255,
            ])
        })
    }

    fn jpeg_bytes(img: &RgbaImage) -> Vec<u8> {
        codec::encode(img, EncodeFormat::Jpeg).unwrap()
    }

    fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
        codec::decode(bytes).unwrap().0.dimensions()
    }

    #[test]
    fn test_full_pipeline_1600x1200() {
        let bytes = jpeg_bytes(&gradient(1600, 1200));
        let out = run(&bytes, &PipelineConfig::default()).unwrap();

        assert_eq!(decoded_dimensions(&out.crops.value.center), (400, 400));
        assert_eq!(decoded_dimensions(&out.crops.value.rect), (600, 600));
        assert_eq!(decoded_dimensions(&out.grayscale.value), (1600, 1200));
        assert_eq!(decoded_dimensions(&out.thumbnail.value), (100, 100));

        // (1200 * 80 * 10) / (1600 * 16) = 37 rows of 80 columns
        let lines: Vec<&str> = out.ascii.value.lines().collect();
        assert_eq!(lines.len(), 37);
        for line in &lines {
            assert_eq!(line.chars().count(), 80);
        }
    }

    #[test]
    fn test_png_source_fails_grayscale_stage() {
        let bytes = codec::encode(&gradient(800, 800), EncodeFormat::Png).unwrap();
        let err = run(&bytes, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_small_source_fails_rect_crop() {
        // 600x600 rect crop cannot fit in a 300x300 source
        let bytes = jpeg_bytes(&gradient(300, 300));
        let err = run(&bytes, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::OutOfBounds { .. }));
    }

    #[test]
    fn test_corrupt_input_aborts_run() {
        let err = run(b"not an image", &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::CorruptInput(_)));
    }

    #[test]
    fn test_invalid_config_rejected_before_decode() {
        let mut config = PipelineConfig::default();
        config.ascii_cols = 0;
        let bytes = jpeg_bytes(&gradient(700, 700));
        let err = run(&bytes, &config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_stage_timings_are_reported() {
        let bytes = jpeg_bytes(&gradient(700, 700));
        let out = run(&bytes, &PipelineConfig::default()).unwrap();
        assert!(out.total >= out.crops.elapsed);
        assert!(out.total >= out.ascii.elapsed);
    }
}
