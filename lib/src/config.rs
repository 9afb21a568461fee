use crate::ascii::GlyphRamp;
use crate::crop::Rect;
use crate::error::PipelineError;
use crate::resize::FilterKind;

/// Configuration for one pipeline run
///
/// The defaults are the fixed service configuration: established at process
/// start, never re-parsed per request.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Center-crop target size
    pub center_crop_width: u32,   // default 400
    pub center_crop_height: u32,  // default 400

    /// Rectangular crop region, anchored wherever the rect says
    pub rect_crop: Rect,          // default (0,0)-(600,600)

    /// Thumbnail target size and kernel
    pub thumbnail_width: u32,     // default 100
    pub thumbnail_height: u32,    // default 100
    pub thumbnail_filter: FilterKind, // default Nearest

    /// ASCII rendering
    pub ascii_cols: u32,          // default 80
    pub glyph_ramp: GlyphRamp,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            center_crop_width: 400,
            center_crop_height: 400,

            rect_crop: Rect::new(0, 0, 600, 600),

            thumbnail_width: 100,
            thumbnail_height: 100,
            thumbnail_filter: FilterKind::Nearest,

            ascii_cols: 80,
            glyph_ramp: GlyphRamp::default(),
        }
    }
}

impl PipelineConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.center_crop_width == 0 || self.center_crop_height == 0 {
            return Err(PipelineError::InvalidDimensions {
                width: self.center_crop_width,
                height: self.center_crop_height,
            });
        }
        if self.rect_crop.x0 >= self.rect_crop.x1 || self.rect_crop.y0 >= self.rect_crop.y1 {
            return Err(PipelineError::InvalidDimensions {
                width: self.rect_crop.width(),
                height: self.rect_crop.height(),
            });
        }
        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(PipelineError::InvalidDimensions {
                width: self.thumbnail_width,
                height: self.thumbnail_height,
            });
        }
        if self.ascii_cols == 0 {
            return Err(PipelineError::InvalidDimensions {
                width: self.ascii_cols,
                height: 0,
            });
        }
        Ok(())
    }
}
