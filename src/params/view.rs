//! Live view state mutated by the input controls.
//!
//! The pipeline reads this once per tick and never writes it.

use std::str::FromStr;

use super::ConfigError;

/// Smallest allowed smoothing time constant (1 = no smoothing)
pub const MIN_SMOOTHING: f64 = 1.0;

/// Which polylines the renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Phase-space curve only
    #[default]
    Curve,
    /// Waveform trace only
    Wave,
    /// Both polylines
    Both,
}

impl DisplayMode {
    /// Next mode in the curve → wave → both cycle
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Curve => DisplayMode::Wave,
            DisplayMode::Wave => DisplayMode::Both,
            DisplayMode::Both => DisplayMode::Curve,
        }
    }

    pub fn shows_curve(self) -> bool {
        matches!(self, DisplayMode::Curve | DisplayMode::Both)
    }

    pub fn shows_wave(self) -> bool {
        matches!(self, DisplayMode::Wave | DisplayMode::Both)
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curve" | "hilbert" => Ok(DisplayMode::Curve),
            "wave" | "waveform" => Ok(DisplayMode::Wave),
            "both" => Ok(DisplayMode::Both),
            other => Err(format!(
                "unknown display mode '{}', expected curve, wave or both",
                other
            )),
        }
    }
}

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Tunable parameters and display flags
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Multiplier applied to the analytic signal before centering
    /// May go to zero or negative (mirrors the curve)
    pub scale: f64,

    /// Smoothing time constant `a`, always >= 1
    smoothing: f64,

    pub display_mode: DisplayMode,

    /// When set the renderer keeps the last displayed frame
    pub frozen: bool,

    pub viewport: Viewport,
}

impl ViewState {
    /// Default scale for raw i16 input
    pub const DEFAULT_SCALE: f64 = 0.04;

    /// Default smoothing time constant
    pub const DEFAULT_SMOOTHING: f64 = 50.0;

    pub fn new(viewport: Viewport) -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
            smoothing: Self::DEFAULT_SMOOTHING,
            display_mode: DisplayMode::default(),
            frozen: false,
            viewport,
        }
    }

    /// Override the smoothing constant, rejecting values below the floor
    /// and non-finite values
    pub fn with_smoothing(mut self, smoothing: f64) -> Result<Self, ConfigError> {
        if !smoothing.is_finite() || smoothing < MIN_SMOOTHING {
            return Err(ConfigError::Smoothing(smoothing));
        }
        self.smoothing = smoothing;
        Ok(self)
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Multiply the smoothing constant by `factor`, kept within
    /// [`MIN_SMOOTHING`]..=`f64::MAX`
    pub fn scale_smoothing(&mut self, factor: f64) -> f64 {
        let next = self.smoothing * factor;
        self.smoothing = if next.is_nan() {
            MIN_SMOOTHING
        } else {
            next.clamp(MIN_SMOOTHING, f64::MAX)
        };
        self.smoothing
    }

    pub fn nudge_scale(&mut self, delta: f64) -> f64 {
        self.scale += delta;
        self.scale
    }

    pub fn toggle_freeze(&mut self) -> bool {
        self.frozen = !self.frozen;
        self.frozen
    }

    pub fn cycle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.next();
        self.display_mode
    }
}
