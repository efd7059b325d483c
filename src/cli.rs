//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::params::{
    audio_constants, AudioConfig, ConfigError, DisplayMode, RenderConfig, ViewState, Viewport,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "hilbertscope")]
#[command(about = "Live phase-space scope for a mono audio input", long_about = None)]
pub struct Args {
    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "600")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "600")]
    pub height: u32,

    /// Frame rate; one audio block is consumed per frame
    #[arg(long, value_name = "HZ", default_value = "100")]
    pub fps: u32,

    /// Capture sample rate
    #[arg(long, value_name = "HZ", default_value_t = audio_constants::SAMPLE_RATE_HZ)]
    pub sample_rate: u32,

    /// Samples per block (positive, even)
    #[arg(long, value_name = "SAMPLES", default_value_t = audio_constants::BLOCK_SIZE)]
    pub block_size: usize,

    /// Initial scale applied to the analytic signal
    #[arg(long, default_value_t = ViewState::DEFAULT_SCALE, allow_negative_numbers = true)]
    pub scale: f64,

    /// Initial smoothing time constant (>= 1)
    #[arg(long, default_value_t = ViewState::DEFAULT_SMOOTHING)]
    pub smoothing: f64,

    /// Display mode: curve (default), wave, both
    #[arg(long, value_name = "MODE", default_value = "curve")]
    pub mode: DisplayMode,

    /// Input device name (default input device if omitted)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Print available input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Directory snapshots are written to
    #[arg(long, value_name = "DIR", default_value = "screenshots")]
    pub screenshot_dir: PathBuf,
}

impl Args {
    /// Build the audio configuration
    pub fn audio_config(&self) -> Result<AudioConfig, ConfigError> {
        let config = AudioConfig {
            sample_rate_hz: self.sample_rate,
            block_size: self.block_size,
            device_name: self.device.clone(),
            ..AudioConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the render configuration
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let config = RenderConfig {
            window_width: self.width,
            window_height: self.height,
            fps: self.fps,
            screenshot_dir: self.screenshot_dir.clone(),
            ..RenderConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the initial view state for the requested window size
    pub fn view_state(&self) -> Result<ViewState, ConfigError> {
        let mut view = ViewState::new(Viewport::new(self.width, self.height))
            .with_smoothing(self.smoothing)?;
        view.scale = self.scale;
        view.display_mode = self.mode;
        Ok(view)
    }
}
