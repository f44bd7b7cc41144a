//! emerald-tone: deterministic color normalization for product photography
//!
//! This library analyzes RGBA pixel buffers and rewrites them toward a
//! target look: luminance retarget, contrast stretch around mid-gray,
//! percentile-based white balance, an emerald-hue saturation boost and a
//! radial vignette. It has no I/O and no dependencies; decoding and
//! encoding belong to the application.
//!
//! # Quick Start
//!
//! ```
//! use emerald_tone::{analyze, normalize, PixelBuffer, Preset};
//!
//! let buffer = PixelBuffer::filled(4, 4, [90, 120, 80, 255]).unwrap();
//! let analysis = analyze(&buffer);
//! let output = normalize(&buffer, &analysis, &Preset::Studio.settings());
//!
//! assert_eq!(output.width(), 4);
//! assert_eq!(output.height(), 4);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! PixelBuffer (RGBA8)
//!     |
//!     v
//! analyze()                 one pass: histograms, brightness, saturation,
//!     |                     color temperature; contrast from the
//!     |                     luminance histogram
//!     v
//! ImageAnalysis ----+
//!                   |
//! Settings ---------+--> normalize()
//!                            |
//!                            |  per pixel, channels as f64:
//!                            |  1. white balance (5% bright percentile)
//!                            |  2. luminance retarget
//!                            |  3. contrast stretch around 128
//!                            |  4. emerald boost
//!                            |  5. vignette
//!                            |  6. clamp + round, alpha passthrough
//!                            v
//!                       PixelBuffer (new)
//! ```
//!
//! # Luminance
//!
//! Luminance uses the BT.601 weights `0.299 R + 0.587 G + 0.114 B` on
//! gamma-encoded sRGB bytes. This is not colorimetrically exact; the
//! weights are fixed so that analysis values match what the studio UI has
//! always displayed.
//!
//! # Determinism
//!
//! [`normalize()`] is a pure function of its inputs. The same buffer,
//! analysis and settings always produce byte-identical output. It is not
//! idempotent: running it again on its own output retargets relative to a
//! new analysis and generally moves pixels further.

pub mod analysis;
pub mod buffer;
pub mod normalize;


pub use analysis::{analyze, luminance, ColorTone, Histogram, Histograms, ImageAnalysis};
pub use buffer::{BufferError, PixelBuffer};
pub use normalize::{
    normalize, NormalizationSettings, Normalizer, Preset, PresetKind, UnknownPresetError,
};
