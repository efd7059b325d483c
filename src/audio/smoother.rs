//! Single-pole complex low-pass filter.

use rustfft::num_complex::Complex;

use super::Sample;

/// Filter registers carried from one block to the next
#[derive(Debug, Clone, Copy, PartialEq)]
struct SmootherState {
    prev: Sample,
    curr: Sample,
}

impl Default for SmootherState {
    fn default() -> Self {
        Self {
            prev: Complex::new(0.0, 0.0),
            curr: Complex::new(0.0, 0.0),
        }
    }
}

/// Exponential smoother with time constant `a`
///
/// `curr ← prev + (x − prev) / a` per sample, with `prev` holding the last
/// output. `a = 1` passes the input through; larger values respond slower.
/// Values below 1 (or NaN) are treated as 1.
#[derive(Debug, Clone, Default)]
pub struct ComplexExponentialSmoother {
    state: SmootherState,
}

impl ComplexExponentialSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter one sample
    pub fn step(&mut self, x: Sample, a: f64) -> Sample {
        let a = effective_time_constant(a);
        self.state.prev = self.state.curr;
        self.state.curr = self.state.prev + (x - self.state.prev) / a;
        self.state.curr
    }

    /// Filter a block in place, in arrival order
    pub fn process(&mut self, samples: &mut [Sample], a: f64) {
        let a = effective_time_constant(a);
        for sample in samples {
            *sample = self.step(*sample, a);
        }
    }

    /// Return both registers to zero
    pub fn reset(&mut self) {
        self.state = SmootherState::default();
    }
}

fn effective_time_constant(a: f64) -> f64 {
    if a >= 1.0 {
        a
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Complex::new(i as f64 * 3.0 - 50.0, (i as f64).sin() * 40.0))
            .collect()
    }

    fn assert_close(a: &[Sample], b: &[Sample]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).norm() < 1e-9, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_unit_time_constant_is_identity() {
        let input = ramp(300);
        let mut output = input.clone();
        let mut smoother = ComplexExponentialSmoother::new();
        smoother.process(&mut output, 1.0);
        assert_close(&output, &input);
    }

    #[test]
    fn test_constant_input_approaches_without_overshoot() {
        let target = Complex::new(300.0, -120.0);
        let mut smoother = ComplexExponentialSmoother::new();
        let mut last_distance = target.norm();

        for _ in 0..500 {
            let out = smoother.step(target, 7.5);
            let distance = (target - out).norm();
            assert!(distance <= last_distance);
            // Same side of the target on both axes
            assert!(out.re <= target.re && out.im >= target.im);
            last_distance = distance;
        }
        assert!(last_distance < 1e-6);
    }

    #[test]
    fn test_state_carries_across_blocks() {
        let input = ramp(256);

        let mut whole = input.clone();
        ComplexExponentialSmoother::new().process(&mut whole, 12.0);

        let mut split = input.clone();
        let mut smoother = ComplexExponentialSmoother::new();
        let (first, second) = split.split_at_mut(100);
        smoother.process(first, 12.0);
        smoother.process(second, 12.0);

        assert_eq!(split, whole);
    }

    #[test]
    fn test_first_sample_from_rest() {
        let mut smoother = ComplexExponentialSmoother::new();
        let out = smoother.step(Complex::new(10.0, 20.0), 4.0);
        assert_eq!(out, Complex::new(2.5, 5.0));
    }

    #[test]
    fn test_reset_returns_to_rest() {
        let mut smoother = ComplexExponentialSmoother::new();
        smoother.step(Complex::new(100.0, 100.0), 2.0);
        smoother.reset();
        let out = smoother.step(Complex::new(10.0, 20.0), 4.0);
        assert_eq!(out, Complex::new(2.5, 5.0));
    }

    #[test]
    fn test_time_constant_below_one_is_clamped() {
        let input = ramp(32);
        for a in [0.0, 0.5, -3.0, f64::NAN] {
            let mut output = input.clone();
            ComplexExponentialSmoother::new().process(&mut output, a);
            assert_close(&output, &input);
        }
    }
}
