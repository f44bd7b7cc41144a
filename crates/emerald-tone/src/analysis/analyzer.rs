//! Image statistics computed in one scan over the pixels.

use crate::buffer::PixelBuffer;

use super::Histogram;

/// BT.601 luma weights.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Perceptual luminance of an 8-bit RGB triple, rounded to the nearest level.
///
/// ```
/// use emerald_tone::luminance;
///
/// assert_eq!(luminance(255, 255, 255), 255);
/// assert_eq!(luminance(0, 255, 0), 150);
/// ```
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    luminance_f64(r as f64, g as f64, b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Unrounded luminance for channels that are mid-correction.
#[inline]
pub(crate) fn luminance_f64(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// HSL saturation of one pixel in `0.0..=1.0`.
#[inline]
fn hsl_saturation(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b) as f64 / 255.0;
    let min = r.min(g).min(b) as f64 / 255.0;
    if max == min {
        return 0.0;
    }
    let delta = max - min;
    let lightness = (max + min) / 2.0;
    if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    }
}

/// Per-channel and luminance histograms of one image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histograms {
    pub r: Histogram,
    pub g: Histogram,
    pub b: Histogram,
    pub luminance: Histogram,
}

/// Warm/cool reading of [`ImageAnalysis::color_temp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorTone {
    Warm,
    Cool,
    Neutral,
}

impl ColorTone {
    pub fn label(self) -> &'static str {
        match self {
            ColorTone::Warm => "Warm",
            ColorTone::Cool => "Cool",
            ColorTone::Neutral => "Neutral",
        }
    }
}

/// Statistics of a source image.
///
/// Produced once by [`analyze()`] and read by the normalizer and by the
/// UI. The histograms each sum to the pixel count, and `brightness` is the
/// mean of the luminance histogram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImageAnalysis {
    /// Mean luminance, 0–255.
    pub brightness: f64,
    /// Population standard deviation of luminance.
    pub contrast: f64,
    /// Red/blue bias, -100 (cool) to +100 (warm).
    pub color_temp: f64,
    /// Mean HSL saturation, 0–100.
    pub saturation: f64,
    pub histograms: Histograms,
}

impl ImageAnalysis {
    /// Classify the color temperature for display.
    pub fn tone(&self) -> ColorTone {
        if self.color_temp > 0.0 {
            ColorTone::Warm
        } else if self.color_temp < 0.0 {
            ColorTone::Cool
        } else {
            ColorTone::Neutral
        }
    }

    /// Number of pixels the analysis covers.
    pub fn pixel_count(&self) -> u64 {
        self.histograms.luminance.total()
    }
}

/// Analyze a pixel buffer.
///
/// Alpha is ignored. Contrast is the population standard deviation of the
/// rounded luminance; because luminance is an integer bucket, the second
/// pass runs over the 256 luminance buckets instead of the pixels.
///
/// # Example
///
/// ```
/// use emerald_tone::{analyze, PixelBuffer};
///
/// let buffer = PixelBuffer::from_pixels(
///     2,
///     2,
///     &[[50, 50, 50, 255], [200, 200, 200, 255], [50, 50, 50, 255], [200, 200, 200, 255]],
/// )
/// .unwrap();
/// let analysis = analyze(&buffer);
///
/// assert_eq!(analysis.brightness, 125.0);
/// assert_eq!(analysis.contrast, 75.0);
/// ```
pub fn analyze(buffer: &PixelBuffer) -> ImageAnalysis {
    let mut histograms = Histograms::default();
    let mut sum_luma = 0u64;
    let mut sum_r = 0u64;
    let mut sum_b = 0u64;
    let mut sum_saturation = 0.0f64;

    for px in buffer.pixels() {
        let (r, g, b) = (px[0], px[1], px[2]);
        let luma = luminance(r, g, b);

        histograms.r.record(r);
        histograms.g.record(g);
        histograms.b.record(b);
        histograms.luminance.record(luma);

        sum_luma += luma as u64;
        sum_r += r as u64;
        sum_b += b as u64;
        sum_saturation += hsl_saturation(r, g, b);
    }

    let count = buffer.pixel_count();
    if count == 0 {
        return ImageAnalysis {
            brightness: 0.0,
            contrast: 0.0,
            color_temp: 0.0,
            saturation: 0.0,
            histograms,
        };
    }

    let n = count as f64;
    let brightness = sum_luma as f64 / n;
    let contrast = (histograms.luminance.squared_deviation(brightness) / n).sqrt();
    let color_temp = ((sum_r as f64 / n - sum_b as f64 / n) / 255.0) * 100.0;
    let saturation = sum_saturation / n * 100.0;

    ImageAnalysis {
        brightness,
        contrast,
        color_temp,
        saturation,
        histograms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 150);
        assert_eq!(luminance(0, 0, 255), 29);
        assert_eq!(luminance(128, 128, 128), 128);
    }

    #[test]
    fn test_hsl_saturation_gray_is_zero() {
        assert_eq!(hsl_saturation(0, 0, 0), 0.0);
        assert_eq!(hsl_saturation(128, 128, 128), 0.0);
        assert_eq!(hsl_saturation(255, 255, 255), 0.0);
    }

    #[test]
    fn test_hsl_saturation_primary_is_full() {
        assert!((hsl_saturation(255, 0, 0) - 1.0).abs() < 1e-12);
        assert!((hsl_saturation(0, 0, 255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hsl_saturation_light_branch() {
        // max=1.0, min=0.6 -> l=0.8 > 0.5 -> 0.4 / (2 - 1.6) = 1.0
        let s = hsl_saturation(255, 153, 153);
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
        // max=0.8, min=0.6 -> l=0.7 -> 0.2 / 0.6
        let s = hsl_saturation(204, 153, 153);
        assert!((s - 0.2 / 0.6).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_hsl_saturation_dark_branch() {
        // max=0.4, min=0.2 -> l=0.3 -> 0.2 / 0.6
        let s = hsl_saturation(102, 51, 51);
        assert!((s - 0.2 / 0.6).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_analyze_uniform_color() {
        let buffer = PixelBuffer::filled(3, 3, [200, 100, 50, 255]).unwrap();
        let analysis = analyze(&buffer);

        assert_eq!(analysis.brightness, luminance(200, 100, 50) as f64);
        assert_eq!(analysis.contrast, 0.0);
        assert!((analysis.color_temp - (150.0 / 255.0) * 100.0).abs() < 1e-9);
        assert_eq!(analysis.tone(), ColorTone::Warm);
        assert_eq!(analysis.pixel_count(), 9);
    }

    #[test]
    fn test_analyze_cool_image() {
        let buffer = PixelBuffer::filled(2, 2, [20, 60, 220, 255]).unwrap();
        let analysis = analyze(&buffer);
        assert!(analysis.color_temp < 0.0);
        assert_eq!(analysis.tone(), ColorTone::Cool);
        assert_eq!(analysis.tone().label(), "Cool");
    }

    #[test]
    fn test_analyze_ignores_alpha() {
        let opaque = PixelBuffer::filled(2, 2, [90, 140, 60, 255]).unwrap();
        let clear = PixelBuffer::filled(2, 2, [90, 140, 60, 0]).unwrap();
        assert_eq!(analyze(&opaque), analyze(&clear));
    }

    #[test]
    fn test_brightness_matches_luminance_histogram_mean() {
        let pixels: Vec<[u8; 4]> = (0..64u32)
            .map(|i| [(i * 4) as u8, (255 - i * 3) as u8, (i * 2 + 7) as u8, 255])
            .collect();
        let buffer = PixelBuffer::from_pixels(8, 8, &pixels).unwrap();
        let analysis = analyze(&buffer);
        assert!((analysis.brightness - analysis.histograms.luminance.mean()).abs() < 1e-9);
    }

    #[test]
    fn test_saturation_scaled_to_percent() {
        let buffer = PixelBuffer::filled(1, 1, [255, 0, 0, 255]).unwrap();
        assert!((analyze(&buffer).saturation - 100.0).abs() < 1e-9);
    }
}
