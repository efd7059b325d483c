//! Fixed-rate frame scheduler driving the signal pipeline.

use log::debug;
use std::time::{Duration, Instant};

use crate::audio::{
    read_block_or_silence, AnalyticSignalTransform, AudioBlockSource, AudioError, BlockStatus,
    ComplexExponentialSmoother, LoudnessColorMapper,
};
use crate::geometry::{viewport_center, CoordinateProjector, Point};
use crate::params::{AudioConfig, DisplayMode, RenderConfig, ViewState};

/// Everything the renderer needs for one tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Phase-space curve in pixel space
    pub curve: &'a [Point],

    /// Waveform trace in pixel space
    pub wave: &'a [Point],

    /// Curve color (RGBA) derived from block loudness
    pub color: [f32; 4],

    pub display_mode: DisplayMode,

    /// Renderer must leave the displayed frame untouched
    pub frozen: bool,

    /// Transient status text, if one is live
    pub overlay: Option<&'a str>,
}

/// Push-based sink for per-tick geometry
pub trait Renderer {
    fn submit(&mut self, frame: &Frame<'_>);
}

/// Summary of one tick, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub loudness: f64,
    pub status: BlockStatus,
    pub elapsed_s: f64,
}

/// Fixed-interval deadline tracker
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    deadline: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.map_or(true, |deadline| now >= deadline)
    }

    /// Schedule the next tick one interval after the previous deadline,
    /// re-anchoring on `now` if the loop has fallen behind
    pub fn advance(&mut self, now: Instant) -> Instant {
        let next = match self.deadline {
            Some(deadline) if deadline + self.interval > now => deadline + self.interval,
            _ => now + self.interval,
        };
        self.deadline = Some(next);
        next
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Runs capture → analytic transform → smoothing → projection once per tick
pub struct FrameScheduler {
    transform: AnalyticSignalTransform,
    smoother: ComplexExponentialSmoother,
    projector: CoordinateProjector,
    mapper: LoudnessColorMapper,
    clock: TickClock,

    raw: Vec<i16>,
    block: Vec<f64>,

    line_alpha: f32,
    elapsed_s: f64,
}

impl FrameScheduler {
    pub fn new(audio: &AudioConfig, render: &RenderConfig) -> Self {
        Self {
            transform: AnalyticSignalTransform::new(),
            smoother: ComplexExponentialSmoother::new(),
            projector: CoordinateProjector::new(),
            mapper: LoudnessColorMapper::new(audio.loudness_normalization),
            clock: TickClock::new(render.tick_interval()),
            raw: Vec::with_capacity(audio.block_size),
            block: Vec::with_capacity(audio.block_size),
            line_alpha: render.line_alpha,
            elapsed_s: 0.0,
        }
    }

    /// Seconds accumulated over all ticks
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut TickClock {
        &mut self.clock
    }

    /// Run one tick and hand the result to `renderer`
    ///
    /// Overflow is absorbed as a silent block; any other capture error is
    /// returned before the renderer is touched.
    pub fn tick<S, R>(
        &mut self,
        source: &mut S,
        view: &ViewState,
        overlay: Option<&str>,
        renderer: &mut R,
        dt_s: f64,
    ) -> Result<TickReport, AudioError>
    where
        S: AudioBlockSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let status = read_block_or_silence(source, &mut self.raw, &mut self.block)?;

        let (loudness, rgb) = self.mapper.map(&self.block);

        let signal = self.transform.process(
            &self.block,
            view.scale,
            viewport_center(view.viewport),
        );
        self.smoother.process(signal, view.smoothing());
        let geometry = self.projector.project(signal, view.viewport);

        renderer.submit(&Frame {
            curve: &geometry.curve,
            wave: &geometry.wave,
            color: [rgb[0], rgb[1], rgb[2], self.line_alpha],
            display_mode: view.display_mode,
            frozen: view.frozen,
            overlay,
        });

        self.elapsed_s += dt_s;
        debug!(
            "tick t={:.3}s loudness={:.4} status={:?}",
            self.elapsed_s, loudness, status
        );

        Ok(TickReport {
            loudness,
            status,
            elapsed_s: self.elapsed_s,
        })
    }
}
