//! FFT-based analytic signal construction.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::Sample;

/// Discrete analytic signal of a real block, scaled and re-centered
///
/// The real part of the output reproduces the input; the imaginary part is
/// its Hilbert transform over the block (one-sided spectrum method, no
/// windowing, so the block edges carry the usual wrap-around artifacts).
pub struct AnalyticSignalTransform {
    planner: FftPlanner<f64>,
    forward: Option<Arc<dyn Fft<f64>>>,
    inverse: Option<Arc<dyn Fft<f64>>>,
    buffer: Vec<Sample>,
    scratch: Vec<Sample>,
}

impl Default for AnalyticSignalTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticSignalTransform {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            forward: None,
            inverse: None,
            buffer: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Re-plan only when the block length changes
    fn plan(&mut self, len: usize) -> (Arc<dyn Fft<f64>>, Arc<dyn Fft<f64>>) {
        if let (Some(fwd), Some(inv)) = (&self.forward, &self.inverse) {
            if fwd.len() == len {
                return (Arc::clone(fwd), Arc::clone(inv));
            }
        }

        let fwd = self.planner.plan_fft_forward(len);
        let inv = self.planner.plan_fft_inverse(len);
        let scratch_len = fwd
            .get_inplace_scratch_len()
            .max(inv.get_inplace_scratch_len());
        self.scratch.resize(scratch_len, Complex::new(0.0, 0.0));
        self.forward = Some(Arc::clone(&fwd));
        self.inverse = Some(Arc::clone(&inv));
        (fwd, inv)
    }

    /// Compute `analytic(block) * scale + offset`
    ///
    /// Returns a view of the internal buffer, valid until the next call.
    /// An empty block yields an empty signal.
    pub fn process(&mut self, block: &[f64], scale: f64, offset: Sample) -> &mut [Sample] {
        self.buffer.clear();
        let n = block.len();
        if n == 0 {
            return &mut self.buffer;
        }

        let (fwd, inv) = self.plan(n);
        self.buffer
            .extend(block.iter().map(|&x| Complex::new(x, 0.0)));

        fwd.process_with_scratch(&mut self.buffer, &mut self.scratch);
        keep_positive_frequencies(&mut self.buffer);
        inv.process_with_scratch(&mut self.buffer, &mut self.scratch);

        // rustfft leaves the inverse unnormalized
        let gain = scale / n as f64;
        for sample in &mut self.buffer {
            *sample = *sample * gain + offset;
        }
        &mut self.buffer
    }
}

/// Spectral weights of the analytic signal: DC (and Nyquist, for even
/// lengths) ×1, positive bins ×2, negative bins ×0
fn keep_positive_frequencies(spectrum: &mut [Sample]) {
    let n = spectrum.len();
    let positive_end = (n + 1) / 2;
    let negative_start = n / 2 + 1;

    for bin in &mut spectrum[1..positive_end] {
        *bin *= 2.0;
    }
    for bin in &mut spectrum[negative_start.min(n)..] {
        *bin = Complex::new(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const ZERO: Sample = Complex { re: 0.0, im: 0.0 };

    fn sine(n: usize, cycles: f64, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * cycles * i as f64 / n as f64).sin())
            .collect()
    }

    #[test]
    fn test_real_part_reproduces_input() {
        let block: Vec<f64> = (0..1024)
            .map(|i| ((i * 7919) % 2001) as f64 - 1000.0)
            .collect();
        let mut transform = AnalyticSignalTransform::new();
        let signal = transform.process(&block, 1.0, ZERO);

        assert_eq!(signal.len(), block.len());
        for (out, &x) in signal.iter().zip(&block) {
            assert!((out.re - x).abs() < 1e-6, "{} vs {}", out.re, x);
        }
    }

    #[test]
    fn test_quadrature_of_sine_is_negative_cosine() {
        let n = 1024;
        let block = sine(n, 8.0, 1.0);
        let mut transform = AnalyticSignalTransform::new();
        let signal = transform.process(&block, 1.0, ZERO);

        for (i, out) in signal.iter().enumerate() {
            let expected = -(2.0 * PI * 8.0 * i as f64 / n as f64).cos();
            assert!((out.im - expected).abs() < 1e-9);
            // Constant envelope for a pure tone
            assert!((out.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scale_and_offset() {
        let block = sine(256, 4.0, 1000.0);
        let offset = Complex::new(300.0, 200.0);
        let mut transform = AnalyticSignalTransform::new();

        let reference: Vec<Sample> = transform.process(&block, 1.0, ZERO).to_vec();
        let scaled = transform.process(&block, 0.04, offset);

        for (s, r) in scaled.iter().zip(&reference) {
            let expected = *r * 0.04 + offset;
            assert!((*s - expected).norm() < 1e-9);
        }
    }

    #[test]
    fn test_zero_scale_collapses_to_offset() {
        let block = sine(64, 2.0, 5000.0);
        let offset = Complex::new(300.0, 300.0);
        let mut transform = AnalyticSignalTransform::new();

        for s in transform.process(&block, 0.0, offset).iter() {
            assert!((*s - offset).norm() < 1e-12);
        }
    }

    #[test]
    fn test_odd_length_and_replanning() {
        let mut transform = AnalyticSignalTransform::new();
        let odd = sine(255, 3.0, 1.0);
        assert_eq!(transform.process(&odd, 1.0, ZERO).len(), 255);

        let even = sine(512, 3.0, 1.0);
        let signal = transform.process(&even, 1.0, ZERO);
        assert_eq!(signal.len(), 512);
        assert!((signal[100].re - even[100]).abs() < 1e-9);
    }

    #[test]
    fn test_empty_block_is_noop() {
        let mut transform = AnalyticSignalTransform::new();
        assert!(transform
            .process(&[], 1.0, Complex::new(1.0, 1.0))
            .is_empty());
    }

    #[test]
    fn test_single_sample_block() {
        let mut transform = AnalyticSignalTransform::new();
        let signal = transform.process(&[42.0], 1.0, ZERO);
        assert_eq!(signal.len(), 1);
        assert!((signal[0].re - 42.0).abs() < 1e-12);
        assert!(signal[0].im.abs() < 1e-12);
    }
}
