//! Projection of the smoothed analytic signal into pixel space.
//!
//! Pixel space has its origin at the bottom-left corner with y pointing up.

use std::f64::consts::SQRT_2;

use crate::audio::Sample;
use crate::params::Viewport;

/// One pixel-space point (x, y)
pub type Point = [f32; 2];

/// Polylines handed to the renderer each tick
#[derive(Debug, Clone, Default)]
pub struct DisplayGeometry {
    /// Phase-space ("hilbert") curve, one point per sample
    pub curve: Vec<Point>,

    /// Waveform trace, one point per second sample
    pub wave: Vec<Point>,
}

/// Maps a smoothed signal to the two display polylines
///
/// Buffers are reused across ticks and fully rewritten on every call.
#[derive(Debug, Default)]
pub struct CoordinateProjector {
    geometry: DisplayGeometry,
}

impl CoordinateProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both polylines from `signal`
    pub fn project(&mut self, signal: &[Sample], viewport: Viewport) -> &DisplayGeometry {
        let DisplayGeometry { curve, wave } = &mut self.geometry;

        curve.clear();
        curve.extend(signal.iter().map(|s| [s.re as f32, s.im as f32]));

        let (offset_x, offset_y) = wave_offsets(viewport, signal.len());
        wave.clear();
        wave.extend(
            signal
                .iter()
                .step_by(2)
                .enumerate()
                .map(|(i, s)| [(i as f64 + offset_x) as f32, (s.norm() + offset_y) as f32]),
        );

        &self.geometry
    }
}

/// Offsets that center the waveform trace horizontally and put its baseline
/// on the curve's center
///
/// The signal arrives already shifted by (width/2, height/2), so a silent
/// sample has magnitude `height/2 · √2` for a square viewport; the vertical
/// offset `height/2 · (1 − √2)` brings that back to `height/2`.
pub fn wave_offsets(viewport: Viewport, signal_len: usize) -> (f64, f64) {
    let trace_len = (signal_len / 2) as i64;
    let offset_x = (viewport.width as i64 - trace_len).div_euclid(2) as f64;
    let offset_y = viewport.height as f64 * 0.5 * (1.0 - SQRT_2);
    (offset_x, offset_y)
}

/// Center of the viewport as a complex offset
pub fn viewport_center(viewport: Viewport) -> Sample {
    Sample::new(viewport.width as f64 / 2.0, viewport.height as f64 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample::new(300.0 + i as f64, 300.0 - i as f64 * 0.5))
            .collect()
    }

    #[test]
    fn test_wave_is_half_the_curve() {
        let mut projector = CoordinateProjector::new();
        for n in [2, 64, 1000, 1024, 4096] {
            let geometry = projector.project(&signal(n), Viewport::new(600, 600));
            assert_eq!(geometry.curve.len(), n);
            assert_eq!(geometry.wave.len() * 2, geometry.curve.len());
        }
    }

    #[test]
    fn test_curve_is_real_and_imaginary_parts() {
        let input = signal(16);
        let mut projector = CoordinateProjector::new();
        let geometry = projector.project(&input, Viewport::new(600, 600));

        for (point, s) in geometry.curve.iter().zip(&input) {
            assert_eq!(*point, [s.re as f32, s.im as f32]);
        }
    }

    #[test]
    fn test_wave_uses_every_second_sample() {
        let input = signal(8);
        let mut projector = CoordinateProjector::new();
        let geometry = projector.project(&input, Viewport::new(600, 400));
        let (ox, oy) = wave_offsets(Viewport::new(600, 400), 8);

        for (i, point) in geometry.wave.iter().enumerate() {
            assert_eq!(point[0], (i as f64 + ox) as f32);
            assert_eq!(point[1], (input[2 * i].norm() + oy) as f32);
        }
    }

    #[test]
    fn test_wave_offsets_for_default_window() {
        // 600px wide, 512-point trace → 44px margin each side
        let (ox, oy) = wave_offsets(Viewport::new(600, 600), 1024);
        assert_eq!(ox, 44.0);
        assert!((oy - 300.0 * (1.0 - SQRT_2)).abs() < 1e-12);

        // Trace wider than the window starts off-screen
        let (ox, _) = wave_offsets(Viewport::new(300, 300), 1024);
        assert_eq!(ox, -106.0);
    }

    #[test]
    fn test_silent_wave_sits_on_center_line() {
        let viewport = Viewport::new(600, 600);
        let silent = vec![viewport_center(viewport); 32];
        let mut projector = CoordinateProjector::new();
        let geometry = projector.project(&silent, viewport);

        for point in &geometry.wave {
            assert!((point[1] - 300.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_reprojection_overwrites() {
        let mut projector = CoordinateProjector::new();
        projector.project(&signal(1024), Viewport::new(600, 600));
        let geometry = projector.project(&signal(64), Viewport::new(600, 600));
        assert_eq!(geometry.curve.len(), 64);
        assert_eq!(geometry.wave.len(), 32);
    }
}
