use thiserror::Error;

/// Errors produced by the transformation pipeline
///
/// Every stage failure is specific to one request: callers report the
/// variant to the user and drop the buffers for that invocation only.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input bytes do not parse as a supported image container
    #[error("corrupt input: {0}")]
    CorruptInput(String),

    /// The container format is outside the accepted set, or a stage with a
    /// stricter format restriction was handed the wrong source format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A crop rectangle extends beyond the source buffer's extent
    #[error("crop rectangle ({x0},{y0})-({x1},{y1}) exceeds source bounds {width}x{height}")]
    OutOfBounds {
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
        width: u32,
        height: u32,
    },

    /// A zero or degenerate target size was requested
    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Output serialization failed inside the encoder
    #[error("encode failure: {0}")]
    EncodeFailure(String),
}
