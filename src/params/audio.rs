//! Audio capture configuration and constants.

use super::ConfigError;

/// Audio constants shared by the capture and analysis stages
pub mod audio_constants {
    /// Samples per captured block
    pub const BLOCK_SIZE: usize = 1024;

    /// Capture sample rate (Hz)
    pub const SAMPLE_RATE_HZ: u32 = 44100;

    /// Divisor applied to raw i16 samples before measuring loudness
    pub const LOUDNESS_NORMALIZATION: f64 = 10000.0;

    /// Blocks the capture backlog may hold before it reports an overflow
    pub const BACKLOG_BLOCKS: usize = 8;
}

/// Audio capture configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Capture sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Samples per block; one block is consumed per frame tick
    pub block_size: usize,

    /// Loudness normalization constant (raw sample units per 1.0)
    pub loudness_normalization: f64,

    /// Capture backlog capacity, in blocks
    pub backlog_blocks: usize,

    /// Input device name; `None` selects the host default
    pub device_name: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: audio_constants::SAMPLE_RATE_HZ,
            block_size: audio_constants::BLOCK_SIZE,
            loudness_normalization: audio_constants::LOUDNESS_NORMALIZATION,
            backlog_blocks: audio_constants::BACKLOG_BLOCKS,
            device_name: None,
        }
    }
}

impl AudioConfig {
    /// Capacity of the capture backlog in samples
    pub fn backlog_samples(&self) -> usize {
        self.block_size * self.backlog_blocks.max(1)
    }

    /// Duration of one block in seconds
    pub fn block_duration_s(&self) -> f64 {
        self.block_size as f64 / self.sample_rate_hz as f64
    }

    /// Validate configuration (block size must be even so the waveform trace is exactly half)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 || self.block_size % 2 != 0 {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::SampleRate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AudioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_size, 1024);
        assert_eq!(config.backlog_samples(), 1024 * 8);
    }

    #[test]
    fn test_odd_block_size_rejected() {
        let config = AudioConfig {
            block_size: 1023,
            ..AudioConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BlockSize(1023)));
    }

    #[test]
    fn test_block_duration() {
        let config = AudioConfig::default();
        // 1024 samples @ 44.1kHz ≈ 23.2ms
        assert!((config.block_duration_s() - 0.02322).abs() < 1e-4);
    }
}
