//! Color normalization.
//!
//! [`normalize()`] rewrites every pixel of a buffer toward the look
//! described by [`NormalizationSettings`]. The settings are usually taken
//! from a [`Preset`] and then edited; [`PresetKind::detect()`] tells the UI
//! whether an edited value still equals one of the presets.
//!
//! # Steps
//!
//! Applied per pixel, in this order, on `f64` channels:
//!
//! 1. **White balance** (optional) - per-channel gains from the 5% bright
//!    percentile of each histogram, clamped to 0.8–1.2
//! 2. **Luminance retarget** - scale RGB so mean luminance moves to the target
//! 3. **Contrast stretch** - `128 + (v - 128) * (target_contrast * 0.02 + 0.5)`
//! 4. **Emerald boost** (optional) - push green-dominant pixels away from gray
//! 5. **Vignette** (optional) - radial falloff toward the corners
//! 6. **Clamp and round** - alpha passes through untouched
//!
//! The contrast slider is a stretch strength, not a target standard
//! deviation: 50 stretches by 1.5 and 25 leaves contrast unchanged.

mod normalizer;
mod presets;
mod settings;
mod white_balance;

pub use normalizer::{enhance_emerald, is_emerald_tone, normalize, vignette_factor, Normalizer};
pub use presets::{Preset, PresetKind, UnknownPresetError};
pub use settings::NormalizationSettings;
pub use white_balance::WhiteBalanceGains;
