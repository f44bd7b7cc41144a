//! Per-pixel normalization.
//!
//! The [`Normalizer`] precomputes everything that depends only on the
//! analysis and settings (white balance gains, brightness factor, stretch
//! factor), then walks the buffer once and writes a new one.

use crate::analysis::{luminance_f64, ImageAnalysis};
use crate::buffer::PixelBuffer;

use super::{NormalizationSettings, WhiteBalanceGains};

/// Mid-gray pivot of the contrast stretch.
const MID_GRAY: f64 = 128.0;

/// Below this luminance spread an image is treated as a single flat tone.
const FLAT_CONTRAST: f64 = 1.0;

/// Green gain and red pull applied to emerald-ish pixels.
const EMERALD_GREEN_BOOST: f64 = 1.15;
const EMERALD_RED_PULL: f64 = 0.95;

/// Scales the center-to-corner distance of a unit square to ~1.0.
const VIGNETTE_RADIUS_SCALE: f64 = 1.4142;

/// Reusable normalizer for one settings value.
///
/// Settings are clamped on construction, so out-of-range values from the
/// UI cannot produce NaN or runaway multipliers.
///
/// # Example
///
/// ```
/// use emerald_tone::{analyze, Normalizer, PixelBuffer, Preset};
///
/// let normalizer = Normalizer::new(Preset::Editorial.settings());
///
/// let buffer = PixelBuffer::filled(8, 8, [60, 140, 90, 255]).unwrap();
/// let output = normalizer.process(&buffer, &analyze(&buffer));
///
/// assert_eq!(output.pixel_count(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    settings: NormalizationSettings,
}

impl Normalizer {
    pub fn new(settings: NormalizationSettings) -> Self {
        Self {
            settings: settings.clamped(),
        }
    }

    /// The clamped settings this normalizer applies.
    #[inline]
    pub fn settings(&self) -> &NormalizationSettings {
        &self.settings
    }

    /// Contrast stretch applied for an image with the given analysis.
    ///
    /// A flat image (spread below 1.0) has nothing to stretch around its
    /// own mean, so the factor is 1.0; otherwise it is
    /// `target_contrast * 0.02 + 0.5`.
    pub fn stretch_factor(&self, analysis: &ImageAnalysis) -> f64 {
        if analysis.contrast < FLAT_CONTRAST {
            1.0
        } else {
            self.settings.stretch_factor()
        }
    }

    /// Multiplier that moves the mean luminance to the target.
    pub fn brightness_factor(&self, analysis: &ImageAnalysis) -> f64 {
        self.settings.target_brightness / analysis.brightness.max(1.0)
    }

    /// Normalize `buffer` into a new buffer. The input is not modified.
    pub fn process(&self, buffer: &PixelBuffer, analysis: &ImageAnalysis) -> PixelBuffer {
        let settings = &self.settings;
        let gains = if settings.auto_white_balance {
            WhiteBalanceGains::from_histograms(&analysis.histograms)
        } else {
            WhiteBalanceGains::IDENTITY
        };
        let brightness = self.brightness_factor(analysis);
        let stretch = self.stretch_factor(analysis);
        let vignette = settings.vignette_strength;

        let width = buffer.width();
        let height = buffer.height();
        let mut out = Vec::with_capacity(buffer.as_bytes().len());

        for (i, px) in buffer.pixels().enumerate() {
            let mut rgb = [px[0] as f64, px[1] as f64, px[2] as f64];

            if settings.auto_white_balance {
                rgb = gains.apply(rgb);
            }

            rgb = retarget_luminance(rgb, brightness);
            rgb = rgb.map(|v| MID_GRAY + (v - MID_GRAY) * stretch);

            if settings.enhance_emeralds && is_emerald_tone(rgb[0], rgb[1], rgb[2]) {
                rgb = enhance_emerald(rgb);
            }

            if vignette > 0.0 {
                let x = (i % width as usize) as u32;
                let y = (i / width as usize) as u32;
                let factor = vignette_factor(x, y, width, height, vignette);
                rgb = rgb.map(|v| v * factor);
            }

            out.extend_from_slice(&[
                to_channel(rgb[0]),
                to_channel(rgb[1]),
                to_channel(rgb[2]),
                px[3],
            ]);
        }

        buffer.with_samples(out)
    }
}

/// Normalize a buffer with the given settings.
///
/// Shorthand for `Normalizer::new(*settings).process(buffer, analysis)`.
/// `analysis` must describe `buffer` (the source, before any correction).
pub fn normalize(
    buffer: &PixelBuffer,
    analysis: &ImageAnalysis,
    settings: &NormalizationSettings,
) -> PixelBuffer {
    Normalizer::new(*settings).process(buffer, analysis)
}

/// Scale a pixel so its luminance becomes `luminance * factor`, keeping
/// channel ratios. Black stays black.
#[inline]
fn retarget_luminance(rgb: [f64; 3], factor: f64) -> [f64; 3] {
    let current = luminance_f64(rgb[0], rgb[1], rgb[2]);
    if current <= 0.0 {
        return rgb;
    }
    let target = current * factor;
    let scale = target / current;
    rgb.map(|v| v * scale)
}

/// Whether a pixel reads as emerald green.
///
/// Green must beat 80% of red and 90% of blue and exceed 50, so dark
/// shadows and yellow-orange tones are left alone.
///
/// ```
/// use emerald_tone::normalize::is_emerald_tone;
///
/// assert!(is_emerald_tone(100.0, 90.0, 85.0));
/// assert!(!is_emerald_tone(200.0, 150.0, 100.0));
/// ```
#[inline]
pub fn is_emerald_tone(r: f64, g: f64, b: f64) -> bool {
    g > r * 0.8 && g > b * 0.9 && g > 50.0
}

/// Push green away from the pixel's gray level and pull red toward it.
///
/// Blue is untouched. Callers check [`is_emerald_tone`] first.
#[inline]
pub fn enhance_emerald(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = rgb;
    let avg = (r + g + b) / 3.0;
    [
        avg + (r - avg) * EMERALD_RED_PULL,
        avg + (g - avg) * EMERALD_GREEN_BOOST,
        b,
    ]
}

/// Brightness multiplier for pixel `(x, y)` of a `width` x `height` image.
///
/// Distances are measured from pixel centers, so mirrored pixels get the
/// same factor. 1.0 at the center, falling with the squared distance. At
/// strength 50 the far corner goes to roughly 0.5; the result can dip below
/// zero for out-of-range strengths and is clamped with the rest of the pixel.
#[inline]
pub fn vignette_factor(x: u32, y: u32, width: u32, height: u32, strength: f64) -> f64 {
    let nx = (x as f64 + 0.5) / width as f64 - 0.5;
    let ny = (y as f64 + 0.5) / height as f64 - 0.5;
    let distance = (nx * nx + ny * ny).sqrt() * VIGNETTE_RADIUS_SCALE;
    1.0 - distance * distance * strength / 100.0
}

#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}
