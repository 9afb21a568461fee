//! pixmill - image transformation pipeline
//!
//! This library runs an uploaded raster image through a fixed sequence of
//! pixel-level transformations: center/rectangular cropping, thumbnail
//! resizing, luminance-weighted grayscale conversion and ASCII-art
//! quantization, timing each stage as it goes. All stages are pure CPU-bound
//! functions over per-invocation buffers; I/O is the caller's concern.
//!
//! # Example
//! ```no_run
//! use pixmill::{PipelineConfig, pipeline};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let out = pipeline::run(&bytes, &PipelineConfig::default()).unwrap();
//! print!("{}", out.ascii.value);
//! ```

pub mod ascii;
pub mod codec;
pub mod config;
pub mod crop;
pub mod error;
pub mod grayscale;
pub mod pipeline;
pub mod resize;

// Re-export main types for convenience
pub use ascii::GlyphRamp;
pub use config::PipelineConfig;
pub use crop::Rect;
pub use error::PipelineError;
pub use pipeline::{PipelineOutput, StageResult};
pub use resize::FilterKind;
