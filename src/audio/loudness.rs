//! Block loudness and the loudness → color gradient.

/// RGB color, components in [0, 1]
pub type Rgb = [f32; 3];

/// Quiet-to-loud gradient: blue, green, yellow, red
pub const PALETTE: [Rgb; 4] = [
    [14.0 / 255.0, 82.0 / 255.0, 127.0 / 255.0],
    [69.0 / 255.0, 138.0 / 255.0, 44.0 / 255.0],
    [208.0 / 255.0, 203.0 / 255.0, 57.0 / 255.0],
    [196.0 / 255.0, 28.0 / 255.0, 28.0 / 255.0],
];

/// Root-mean-square of `block / normalization`; 0 for an empty block
pub fn rms(block: &[f64], normalization: f64) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = block
        .iter()
        .map(|&x| {
            let v = x / normalization;
            v * v
        })
        .sum();
    (sum_sq / block.len() as f64).sqrt()
}

/// Map a loudness value onto [`PALETTE`]
///
/// Two sector positions half a sector either side of `pos * 4` are clamped
/// to the palette; the lower one supplies both the base color and the blend
/// weight. Out-of-range loudness saturates at the first or last color.
pub fn interpolate_color(pos: f64) -> Rgb {
    let len = PALETTE.len() as f64;
    let last = len - 1.0;
    let scaled = pos * len;

    // min/max (not clamp) so NaN lands on a palette entry instead of panicking
    let lower = (scaled - 0.5).min(last).max(0.0);
    let upper = (scaled + 0.5).min(last).max(0.0);

    let c1 = PALETTE[lower as usize];
    let c2 = PALETTE[upper as usize];
    let blend = (lower - lower.floor()) as f32;

    [
        c2[0] * blend + c1[0] * (1.0 - blend),
        c2[1] * blend + c1[1] * (1.0 - blend),
        c2[2] * blend + c1[2] * (1.0 - blend),
    ]
}

/// Loudness meter feeding the curve color
#[derive(Debug, Clone)]
pub struct LoudnessColorMapper {
    normalization: f64,
}

impl LoudnessColorMapper {
    pub fn new(normalization: f64) -> Self {
        Self { normalization }
    }

    /// Normalized RMS of a raw block; nominally in [0, 1] but not clamped
    pub fn loudness(&self, block: &[f64]) -> f64 {
        rms(block, self.normalization)
    }

    /// Returns (loudness, color) for a raw block
    pub fn map(&self, block: &[f64]) -> (f64, Rgb) {
        let loudness = self.loudness(block);
        (loudness, interpolate_color(loudness))
    }
}
