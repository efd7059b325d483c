//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (Hz, samples, pixels, seconds)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the pipeline

mod audio;
mod render;
mod view;

// Re-export all types
pub use audio::{audio_constants, AudioConfig};
pub use render::RenderConfig;
pub use view::{DisplayMode, ViewState, Viewport, MIN_SMOOTHING};

use thiserror::Error;

/// Invalid configuration detected before any device is opened
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("block size must be a positive even number, got {0}")]
    BlockSize(usize),

    #[error("sample rate must be > 0")]
    SampleRate,

    #[error("frame rate must be > 0")]
    FrameRate,

    #[error("window size must be non-zero, got {0}x{1}")]
    WindowSize(u32, u32),

    #[error("smoothing constant must be finite and >= 1, got {0}")]
    Smoothing(f64),
}
