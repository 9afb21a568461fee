//! Resampling to a target size
//!
//! Two kernels are exposed: nearest-neighbor for fast thumbnails and
//! Lanczos3 for high-quality scaling. The scale-and-sample loop itself is
//! the `image` crate's; only the kernel differs between the two.

use crate::error::PipelineError;
use image::{RgbaImage, imageops};

/// Resampling kernel used when mapping source pixels to the target grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    /// No interpolation; each target pixel takes the nearest source pixel
    /// under the scale-inverse mapping
    #[default]
    Nearest,
    /// Windowed-sinc interpolation, higher quality and slower
    Lanczos3,
}

impl FilterKind {
    fn as_image_filter(self) -> imageops::FilterType {
        match self {
            FilterKind::Nearest => imageops::FilterType::Nearest,
            FilterKind::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize a buffer to exactly (target_w, target_h) using the given kernel
///
/// # Arguments
/// * `img` - Source buffer (not mutated)
/// * `target_w` - Output width in pixels
/// * `target_h` - Output height in pixels
/// * `filter` - Resampling kernel
///
/// # Errors
/// `InvalidDimensions` if either target dimension is zero.
pub fn resize(
    img: &RgbaImage,
    target_w: u32,
    target_h: u32,
    filter: FilterKind,
) -> Result<RgbaImage, PipelineError> {
    if target_w == 0 || target_h == 0 {
        return Err(PipelineError::InvalidDimensions {
            width: target_w,
            height: target_h,
        });
    }

    Ok(imageops::resize(
        img,
        target_w,
        target_h,
        filter.as_image_filter(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_resize_exact_dimensions() {
        let img = RgbaImage::new(160, 120);
        let out = resize(&img, 100, 100, FilterKind::Nearest).unwrap();
        assert_eq!(out.dimensions(), (100, 100));

        let out = resize(&img, 80, 37, FilterKind::Lanczos3).unwrap();
        assert_eq!(out.dimensions(), (80, 37));
    }

    #[test]
    fn test_resize_upscale() {
        let img = RgbaImage::new(10, 10);
        let out = resize(&img, 40, 40, FilterKind::Lanczos3).unwrap();
        assert_eq!(out.dimensions(), (40, 40));
    }

    #[test]
    fn test_resize_zero_width_fails() {
        let img = RgbaImage::new(16, 16);
        let err = resize(&img, 0, 8, FilterKind::Nearest).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidDimensions { width: 0, height: 8 }
        ));
    }

    #[test]
    fn test_resize_zero_height_fails() {
        let img = RgbaImage::new(16, 16);
        assert!(resize(&img, 8, 0, FilterKind::Lanczos3).is_err());
    }

    #[test]
    fn test_nearest_preserves_solid_color() {
        let img = RgbaImage::from_pixel(32, 32, Rgba([9, 8, 7, 255]));
        let out = resize(&img, 5, 5, FilterKind::Nearest).unwrap();
        for pixel in out.pixels() {
            assert_eq!(*pixel, Rgba([9, 8, 7, 255]));
        }
    }
}
