//! Audio capture and per-block signal analysis.
//!
//! Capture is pull-based: the frame scheduler asks an [`AudioBlockSource`]
//! for one fixed-size block per tick. Everything downstream of the source is
//! a pure function of the block plus the smoother's carried state.

mod analytic;
mod capture;
mod loudness;
mod smoother;
mod source;

pub use analytic::AnalyticSignalTransform;
pub use capture::{list_input_devices, CpalBlockSource};
pub use loudness::{interpolate_color, rms, LoudnessColorMapper, Rgb, PALETTE};
pub use smoother::ComplexExponentialSmoother;
pub use source::{read_block_or_silence, AudioBlockSource, AudioError, BlockStatus};

/// Complex sample type used throughout the pipeline
pub type Sample = rustfft::num_complex::Complex<f64>;
