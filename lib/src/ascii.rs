//! ASCII-art rendering
//!
//! A buffer is first downsampled to a character-grid size, then each cell's
//! luminance is mapped to a glyph from a fixed ramp. The luminance model here
//! is the plain integer gray conversion (BT.601 weights), intentionally
//! distinct from the weighted formula in [`crate::grayscale`]; the two stages
//! use different models and both are kept as-is.

use crate::error::PipelineError;
use crate::resize::{FilterKind, resize};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Default glyph ramp, densest glyph first (index 0 = darkest pixel)
pub const DEFAULT_RAMP: &str = "MND8OZ$7I?+=~:,..";

/// An ordered, fixed-length sequence of glyphs indexed by luminance bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a glyph string; returns `None` for an empty string
    pub fn new(glyphs: &str) -> Option<Self> {
        if glyphs.is_empty() {
            return None;
        }
        Some(Self {
            glyphs: glyphs.chars().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph for a luminance value, bucketed as `y * (len - 1) / 255`
    pub fn glyph_for(&self, luminance: u8) -> char {
        let pos = luminance as usize * (self.glyphs.len() - 1) / 255;
        self.glyphs[pos]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_RAMP.chars().collect(),
        }
    }
}

/// Plain integer luminance (BT.601), matching the standard gray color model
fn luminance(px: &Rgba<u8>) -> u8 {
    // Channels widened to 16 bits so the rounding matches the standard
    // gray color model exactly.
    let r = px[0] as u32 * 0x101;
    let g = px[1] as u32 * 0x101;
    let b = px[2] as u32 * 0x101;
    ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 24) as u8
}

/// Downsample a buffer to the glyph-grid size for a target column count
///
/// The row count is `(src_h * target_cols * 10) / (src_w * 16)` with
/// truncating integer division; the 10/16 factor compensates for the
/// non-square aspect of a typical monospace character cell. Scaling uses
/// the Lanczos3 kernel.
///
/// # Errors
/// `InvalidDimensions` if the source is empty, `target_cols` is zero, or the
/// computed row count truncates to zero.
pub fn scale_for_glyph_grid(
    img: &RgbaImage,
    target_cols: u32,
) -> Result<RgbaImage, PipelineError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions { width, height });
    }

    let target_rows =
        ((height as u64 * target_cols as u64 * 10) / (width as u64 * 16)) as u32;

    resize(img, target_cols, target_rows, FilterKind::Lanczos3)
}

/// Render a grid-sized buffer to ASCII text
///
/// Each of the `rows * cols` cells becomes one glyph chosen by its plain
/// luminance; every row is newline-terminated. The text is produced once per
/// call, there is no resumable state.
///
/// # Arguments
/// * `img` - Buffer already scaled to the glyph grid (at least cols x rows)
/// * `cols` - Number of character columns
/// * `rows` - Number of character rows
/// * `ramp` - Glyph ramp, densest glyph first
pub fn render(img: &RgbaImage, cols: u32, rows: u32, ramp: &GlyphRamp) -> String {
    let (width, height) = img.dimensions();
    assert!(cols <= width && rows <= height);

    // Rows are independent; render them in parallel and join in order.
    (0..rows)
        .into_par_iter()
        .map(|row| {
            let mut line = String::with_capacity(cols as usize + 1);
            for col in 0..cols {
                let y = luminance(img.get_pixel(col, row));
                line.push(ramp.glyph_for(y));
            }
            line.push('\n');
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ramp_length() {
        let ramp = GlyphRamp::default();
        assert_eq!(ramp.len(), 17);
    }

    #[test]
    fn test_empty_ramp_rejected() {
        assert!(GlyphRamp::new("").is_none());
        assert!(GlyphRamp::new("@. ").is_some());
    }

    #[test]
    fn test_glyph_for_extremes() {
        let ramp = GlyphRamp::default();
        assert_eq!(ramp.glyph_for(0), 'M');
        assert_eq!(ramp.glyph_for(255), '.');
    }

    #[test]
    fn test_glyph_for_midtone() {
        // 128 * 16 / 255 = 8 -> 'I'
        let ramp = GlyphRamp::default();
        assert_eq!(ramp.glyph_for(128), 'I');
    }

    #[test]
    fn test_luminance_gray_is_identity() {
        assert_eq!(luminance(&Rgba([128, 128, 128, 255])), 128);
        assert_eq!(luminance(&Rgba([0, 0, 0, 255])), 0);
        assert_eq!(luminance(&Rgba([255, 255, 255, 255])), 255);
    }

    #[test]
    fn test_scale_row_count_truncates() {
        // (1200 * 80 * 10) / (1600 * 16) = 37.5 -> 37
        let img = RgbaImage::new(1600, 1200);
        let scaled = scale_for_glyph_grid(&img, 80).unwrap();
        assert_eq!(scaled.dimensions(), (80, 37));
    }

    #[test]
    fn test_scale_zero_rows_is_invalid() {
        // 10 source rows at 2 columns truncates to zero rows
        let img = RgbaImage::new(1000, 10);
        let err = scale_for_glyph_grid(&img, 2).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_render_solid_black() {
        let img = RgbaImage::from_pixel(8, 3, Rgba([0, 0, 0, 255]));
        let ramp = GlyphRamp::default();
        let text = render(&img, 8, 3, &ramp);
        assert_eq!(text, "MMMMMMMM\n".repeat(3));
    }

    #[test]
    fn test_render_solid_white() {
        let img = RgbaImage::from_pixel(5, 2, Rgba([255, 255, 255, 255]));
        let ramp = GlyphRamp::default();
        let text = render(&img, 5, 2, &ramp);
        assert_eq!(text, ".....\n.....\n");
    }

    #[test]
    fn test_render_line_structure() {
        let img = RgbaImage::new(12, 5);
        let text = render(&img, 12, 5, &GlyphRamp::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            assert_eq!(line.chars().count(), 12);
        }
        assert!(text.ends_with('\n'));
    }
}
