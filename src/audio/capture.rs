//! Live capture from a cpal input device.
//!
//! cpal delivers samples on its own callback thread. They are handed to the
//! pipeline thread through a bounded [`CaptureBacklog`]; the pipeline's
//! blocking [`AudioBlockSource::read_block`] is the only reader.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use log::{error, info, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::source::{AudioBlockSource, AudioError};
use crate::params::AudioConfig;

#[derive(Debug, Default)]
struct BacklogState {
    samples: VecDeque<i16>,
    overflowed: bool,
    failure: Option<String>,
}

/// Bounded hand-off queue between the capture callback and the pipeline
#[derive(Debug)]
pub(crate) struct CaptureBacklog {
    state: Mutex<BacklogState>,
    ready: Condvar,
    capacity: usize,
}

impl CaptureBacklog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(BacklogState {
                samples: VecDeque::with_capacity(capacity),
                ..BacklogState::default()
            }),
            ready: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BacklogState> {
        // A panic while holding the lock leaves the queue itself consistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append samples, dropping the oldest and flagging overflow when full
    pub(crate) fn push(&self, samples: impl IntoIterator<Item = i16>) {
        let mut state = self.lock();
        for sample in samples {
            if state.samples.len() == self.capacity {
                state.samples.pop_front();
                state.overflowed = true;
            }
            state.samples.push_back(sample);
        }
        drop(state);
        self.ready.notify_one();
    }

    /// Record a fatal stream error and wake the reader
    pub(crate) fn fail(&self, message: String) {
        self.lock().failure = Some(message);
        self.ready.notify_all();
    }

    /// Block until `out.len()` samples are queued, then move them into `out`
    ///
    /// An overflow discards the backlog so the next read starts from fresh audio.
    pub(crate) fn pop_block(&self, out: &mut [i16]) -> Result<(), AudioError> {
        let mut state = self.lock();
        loop {
            if let Some(message) = state.failure.clone() {
                return Err(AudioError::Device(message));
            }
            if state.overflowed {
                state.overflowed = false;
                state.samples.clear();
                return Err(AudioError::Overflow);
            }
            if state.samples.len() >= out.len() {
                let n = out.len();
                for (slot, sample) in out.iter_mut().zip(state.samples.drain(..n)) {
                    *slot = sample;
                }
                return Ok(());
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }
}

/// Block source backed by a running cpal input stream
pub struct CpalBlockSource {
    backlog: Arc<CaptureBacklog>,
    block_size: usize,

    /// Audio input stream (kept alive; dropping it releases the device)
    _stream: cpal::Stream,
}

impl CpalBlockSource {
    /// Open the configured input device and start capturing
    pub fn open(config: &AudioConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = match &config.device_name {
            Some(name) => host
                .input_devices()
                .map_err(|e| AudioError::Device(format!("Failed to list devices: {}", e)))?
                .find(|d| d.name().map(|n| &n == name).unwrap_or(false))
                .ok_or_else(|| AudioError::DeviceNotFound(name.clone()))?,
            None => host.default_input_device().ok_or(AudioError::NoDevice)?,
        };

        let supported = select_input_config(&device, config.sample_rate_hz)?;
        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();

        info!(
            "Audio: {} @ {}Hz, {} channel(s), {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            stream_config.sample_rate.0,
            stream_config.channels,
            sample_format
        );
        if stream_config.sample_rate.0 != config.sample_rate_hz {
            warn!(
                "Device does not support {}Hz, capturing at {}Hz",
                config.sample_rate_hz, stream_config.sample_rate.0
            );
        }

        info!(
            "Blocks of {} samples ({:.1} ms), backlog of {} blocks",
            config.block_size,
            config.block_duration_s() * 1000.0,
            config.backlog_blocks
        );

        let backlog = Arc::new(CaptureBacklog::new(config.backlog_samples()));
        let stream = match sample_format {
            SampleFormat::I16 => build_input_stream::<i16>(&device, &stream_config, &backlog),
            SampleFormat::F32 => build_input_stream::<f32>(&device, &stream_config, &backlog),
            SampleFormat::U16 => build_input_stream::<u16>(&device, &stream_config, &backlog),
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        }?;

        stream
            .play()
            .map_err(|e| AudioError::Device(format!("Failed to start audio stream: {}", e)))?;

        Ok(Self {
            backlog,
            block_size: config.block_size,
            _stream: stream,
        })
    }
}

impl AudioBlockSource for CpalBlockSource {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn read_block(&mut self, block: &mut [i16]) -> Result<(), AudioError> {
        self.backlog.pop_block(block)
    }
}

/// Prefer a mono config at the requested rate, then any config at that rate,
/// then the device default
fn select_input_config(
    device: &cpal::Device,
    sample_rate_hz: u32,
) -> Result<cpal::SupportedStreamConfig, AudioError> {
    let rate = cpal::SampleRate(sample_rate_hz);
    let ranges: Vec<_> = device
        .supported_input_configs()
        .map_err(|e| AudioError::Device(format!("Failed to query input configs: {}", e)))?
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .collect();

    if let Some(range) = ranges
        .iter()
        .find(|range| range.channels() == 1)
        .or_else(|| ranges.first())
    {
        return Ok(range.clone().with_sample_rate(rate));
    }

    device
        .default_input_config()
        .map_err(|e| AudioError::Device(format!("Failed to get audio config: {}", e)))
}

/// Build an input stream that forwards the first channel as i16
fn build_input_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    backlog: &Arc<CaptureBacklog>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample,
    i16: FromSample<T>,
{
    let channels = config.channels.max(1) as usize;
    let data_backlog = Arc::clone(backlog);
    let error_backlog = Arc::clone(backlog);

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                data_backlog.push(data.iter().step_by(channels).map(|&s| i16::from_sample(s)));
            },
            move |err| {
                error!("Audio stream error: {}", err);
                error_backlog.fail(err.to_string());
            },
            None,
        )
        .map_err(|e| AudioError::Device(format!("Failed to build audio stream: {}", e)))
}

/// Names of all input devices on the default host
pub fn list_input_devices() -> Result<Vec<String>, AudioError> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| AudioError::Device(format!("Failed to list devices: {}", e)))?;
    Ok(devices.filter_map(|d| d.name().ok()).collect())
}
