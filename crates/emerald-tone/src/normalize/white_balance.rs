//! Percentile-based white balance gains.

use crate::analysis::Histograms;

/// Fraction of pixels, counted from the bright end, that defines a
/// channel's reference level.
pub const WHITE_POINT_FRACTION: f64 = 0.05;

/// Gain limits; stronger corrections introduce casts of their own.
const MIN_GAIN: f64 = 0.8;
const MAX_GAIN: f64 = 1.2;

/// Per-channel multipliers that equalize the bright ends of R, G and B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiteBalanceGains {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl WhiteBalanceGains {
    /// Gains that leave every channel unchanged.
    pub const IDENTITY: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Derive gains from the channel histograms of the source image.
    ///
    /// Each channel's reference is its 5% bright percentile. The brightest
    /// reference becomes the common target and every channel is scaled
    /// toward it, within 0.8–1.2.
    pub fn from_histograms(histograms: &Histograms) -> Self {
        let r_ref = histograms.r.bright_percentile(WHITE_POINT_FRACTION) as f64;
        let g_ref = histograms.g.bright_percentile(WHITE_POINT_FRACTION) as f64;
        let b_ref = histograms.b.bright_percentile(WHITE_POINT_FRACTION) as f64;
        let max_ref = r_ref.max(g_ref).max(b_ref);

        Self {
            r: gain(max_ref, r_ref),
            g: gain(max_ref, g_ref),
            b: gain(max_ref, b_ref),
        }
    }

    #[inline]
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        [rgb[0] * self.r, rgb[1] * self.g, rgb[2] * self.b]
    }
}

#[inline]
fn gain(max_ref: f64, channel_ref: f64) -> f64 {
    (max_ref / channel_ref.max(1.0)).clamp(MIN_GAIN, MAX_GAIN)
}
