//! Center and rectangular cropping
//!
//! Both operations are pure: the source buffer is read but never mutated,
//! and each call produces a freshly allocated output buffer.

use crate::error::PipelineError;
use image::{RgbaImage, imageops};

/// An axis-aligned region within a pixel buffer
///
/// The region spans `x0..x1` horizontally and `y0..y1` vertically
/// (exclusive upper bounds). [`rect_crop`] enforces that the region is
/// non-degenerate and fully contained in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// Crop the centered rectangle of size (target_w, target_h) out of the source
///
/// If the source is smaller than the target along a dimension, the result is
/// clamped to the source's full extent along that dimension rather than
/// failing. For even sources and targets the crop is exactly centered; odd
/// differences leave opposite margins that differ by at most one pixel.
///
/// # Arguments
/// * `img` - Source buffer (not mutated)
/// * `target_w` - Requested crop width in pixels
/// * `target_h` - Requested crop height in pixels
///
/// # Returns
/// A new buffer of at most (target_w, target_h) pixels.
pub fn center_crop(img: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let crop_w = target_w.min(width);
    let crop_h = target_h.min(height);

    let x = (width - crop_w) / 2;
    let y = (height - crop_h) / 2;

    imageops::crop_imm(img, x, y, crop_w, crop_h).to_image()
}

/// Extract the exact given rectangle from the source
///
/// # Errors
/// * `InvalidDimensions` if the rectangle is empty (x0 >= x1 or y0 >= y1)
/// * `OutOfBounds` if the rectangle is not fully contained in the source
pub fn rect_crop(img: &RgbaImage, rect: Rect) -> Result<RgbaImage, PipelineError> {
    if rect.x0 >= rect.x1 || rect.y0 >= rect.y1 {
        return Err(PipelineError::InvalidDimensions {
            width: rect.width(),
            height: rect.height(),
        });
    }

    let (width, height) = img.dimensions();
    if rect.x1 > width || rect.y1 > height {
        return Err(PipelineError::OutOfBounds {
            x0: rect.x0,
            y0: rect.y0,
            x1: rect.x1,
            y1: rect.y1,
            width,
            height,
        });
    }

    Ok(imageops::crop_imm(img, rect.x0, rect.y0, rect.width(), rect.height()).to_image())
}
