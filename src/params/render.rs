//! Rendering and snapshot configuration.

use std::path::PathBuf;
use std::time::Duration;

use super::ConfigError;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Target tick rate (frames per second)
    pub fps: u32,

    /// Alpha of the black quad drawn over the trail every frame
    /// Lower = longer trails
    pub fade_alpha: f32,

    /// Alpha of both polylines
    pub line_alpha: f32,

    /// Waveform trace color (RGB, 0..1)
    pub wave_color: [f32; 3],

    /// How long an overlay message stays visible (seconds)
    pub overlay_lifetime_s: f64,

    /// Extra lifetime granted to snapshot messages (seconds)
    pub snapshot_overlay_delay_s: f64,

    /// Directory snapshots are written to
    pub screenshot_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 600,
            window_height: 600,
            fps: 100,
            fade_alpha: 0.1,
            line_alpha: 0.8,
            wave_color: [0.0, 1.0, 0.0],
            overlay_lifetime_s: 1.0,
            snapshot_overlay_delay_s: 3.0,
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

impl RenderConfig {
    /// Interval between two frame ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::FrameRate);
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::WindowSize(
                self.window_width,
                self.window_height,
            ));
        }
        Ok(())
    }
}
