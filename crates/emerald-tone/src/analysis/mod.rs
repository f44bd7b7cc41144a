//! Single-pass image statistics.
//!
//! [`analyze()`] scans a [`PixelBuffer`](crate::PixelBuffer) once and
//! returns an [`ImageAnalysis`]: mean luminance, luminance spread,
//! an approximate color temperature, average HSL saturation and four
//! 256-bucket [`Histogram`]s. The normalizer reads the histograms for white
//! balance; the UI reads the scalar values for its indicators.

mod analyzer;
mod histogram;

pub use analyzer::{analyze, luminance, ColorTone, Histograms, ImageAnalysis};
pub use histogram::Histogram;

pub(crate) use analyzer::luminance_f64;
