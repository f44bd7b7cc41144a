//! Normalization settings.
//!
//! This module provides [`NormalizationSettings`], the complete set of
//! knobs the normalizer reads. Every field is required; the defaults are
//! the Studio preset.

use super::presets::{Preset, PresetKind};

/// Configuration for [`normalize()`](super::normalize).
///
/// Values outside the documented ranges are accepted here and clamped by
/// the normalizer (see [`clamped()`](Self::clamped)); nothing is rejected.
///
/// # Example
///
/// ```
/// use emerald_tone::{NormalizationSettings, Preset, PresetKind};
///
/// let settings = Preset::Editorial.settings().vignette_strength(30.0);
/// assert_eq!(settings.preset_kind(), PresetKind::Custom);
///
/// let defaults = NormalizationSettings::default();
/// assert_eq!(defaults.preset_kind(), PresetKind::Studio);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizationSettings {
    /// Desired mean luminance after correction (80–200).
    pub target_brightness: f64,

    /// Contrast stretch strength (20–80).
    ///
    /// The stretch factor is `target_contrast * 0.02 + 0.5`, so 25 leaves
    /// contrast unchanged and 50 stretches by 1.5.
    pub target_contrast: f64,

    /// Rebalance channels from their bright-end histogram percentiles.
    pub auto_white_balance: bool,

    /// Boost saturation of green-dominant pixels.
    pub enhance_emeralds: bool,

    /// Corner darkening strength (0–50, 0 disables).
    pub vignette_strength: f64,
}

impl NormalizationSettings {
    pub const MIN_BRIGHTNESS: f64 = 80.0;
    pub const MAX_BRIGHTNESS: f64 = 200.0;
    pub const MIN_CONTRAST: f64 = 20.0;
    pub const MAX_CONTRAST: f64 = 80.0;
    pub const MIN_VIGNETTE: f64 = 0.0;
    pub const MAX_VIGNETTE: f64 = 50.0;

    /// Same as `NormalizationSettings::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target mean luminance.
    #[inline]
    pub fn target_brightness(mut self, value: f64) -> Self {
        self.target_brightness = value;
        self
    }

    /// Set the contrast stretch strength.
    #[inline]
    pub fn target_contrast(mut self, value: f64) -> Self {
        self.target_contrast = value;
        self
    }

    #[inline]
    pub fn auto_white_balance(mut self, enabled: bool) -> Self {
        self.auto_white_balance = enabled;
        self
    }

    #[inline]
    pub fn enhance_emeralds(mut self, enabled: bool) -> Self {
        self.enhance_emeralds = enabled;
        self
    }

    /// Set the vignette strength.
    #[inline]
    pub fn vignette_strength(mut self, value: f64) -> Self {
        self.vignette_strength = value;
        self
    }

    /// Copy with every numeric field forced into its documented range.
    ///
    /// Non-finite values are replaced by the Studio default for that field.
    pub fn clamped(&self) -> Self {
        let defaults = Preset::Studio.settings();
        Self {
            target_brightness: clamp_or(
                self.target_brightness,
                Self::MIN_BRIGHTNESS,
                Self::MAX_BRIGHTNESS,
                defaults.target_brightness,
            ),
            target_contrast: clamp_or(
                self.target_contrast,
                Self::MIN_CONTRAST,
                Self::MAX_CONTRAST,
                defaults.target_contrast,
            ),
            auto_white_balance: self.auto_white_balance,
            enhance_emeralds: self.enhance_emeralds,
            vignette_strength: clamp_or(
                self.vignette_strength,
                Self::MIN_VIGNETTE,
                Self::MAX_VIGNETTE,
                defaults.vignette_strength,
            ),
        }
    }

    /// Multiplier the contrast step applies around mid-gray.
    #[inline]
    pub fn stretch_factor(&self) -> f64 {
        self.target_contrast * 0.02 + 0.5
    }

    /// Which preset, if any, these settings equal.
    #[inline]
    pub fn preset_kind(&self) -> PresetKind {
        PresetKind::detect(self)
    }
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Preset::Studio.settings()
    }
}

#[inline]
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_studio() {
        let settings = NormalizationSettings::default();
        assert_eq!(settings, Preset::Studio.settings());
        assert_eq!(settings.target_brightness, 135.0);
        assert_eq!(settings.target_contrast, 50.0);
        assert_eq!(settings.vignette_strength, 0.0);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(NormalizationSettings::new(), NormalizationSettings::default());
    }

    #[test]
    fn test_builder_chaining() {
        let settings = NormalizationSettings::new()
            .target_brightness(150.0)
            .target_contrast(30.0)
            .auto_white_balance(false)
            .enhance_emeralds(false)
            .vignette_strength(10.0);

        assert_eq!(settings.target_brightness, 150.0);
        assert_eq!(settings.target_contrast, 30.0);
        assert!(!settings.auto_white_balance);
        assert!(!settings.enhance_emeralds);
        assert_eq!(settings.vignette_strength, 10.0);
    }

    #[test]
    fn test_clamped_limits_ranges() {
        let settings = NormalizationSettings::new()
            .target_brightness(500.0)
            .target_contrast(-3.0)
            .vignette_strength(90.0)
            .clamped();

        assert_eq!(settings.target_brightness, 200.0);
        assert_eq!(settings.target_contrast, 20.0);
        assert_eq!(settings.vignette_strength, 50.0);
    }

    #[test]
    fn test_clamped_replaces_non_finite() {
        let settings = NormalizationSettings::new()
            .target_brightness(f64::NAN)
            .target_contrast(f64::INFINITY)
            .vignette_strength(f64::NEG_INFINITY)
            .clamped();

        assert_eq!(settings.target_brightness, 135.0);
        assert_eq!(settings.target_contrast, 50.0);
        assert_eq!(settings.vignette_strength, 0.0);
    }

    #[test]
    fn test_clamped_keeps_in_range_values() {
        let settings = Preset::Editorial.settings();
        assert_eq!(settings.clamped(), settings);
    }

    #[test]
    fn test_stretch_factor() {
        assert_eq!(NormalizationSettings::new().target_contrast(50.0).stretch_factor(), 1.5);
        assert_eq!(NormalizationSettings::new().target_contrast(25.0).stretch_factor(), 1.0);
        assert!((NormalizationSettings::new().target_contrast(80.0).stretch_factor() - 2.1).abs() < 1e-12);
    }
}
