use emerald_tone::{NormalizationSettings, Preset};

/// Individual settings given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub vignette: Option<f64>,
    pub no_white_balance: bool,
    pub no_emeralds: bool,
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the overrides on top of `base`, clamping the result.
    pub fn apply(&self, base: NormalizationSettings) -> NormalizationSettings {
        let mut settings = base;
        if let Some(brightness) = self.brightness {
            settings = settings.target_brightness(brightness);
        }
        if let Some(contrast) = self.contrast {
            settings = settings.target_contrast(contrast);
        }
        if let Some(vignette) = self.vignette {
            settings = settings.vignette_strength(vignette);
        }
        if self.no_white_balance {
            settings = settings.auto_white_balance(false);
        }
        if self.no_emeralds {
            settings = settings.enhance_emeralds(false);
        }
        settings.clamped()
    }
}

/// Pick the settings for a run.
///
/// An explicit preset wins, then the stored custom settings, then the
/// configured default preset, then Studio. Overrides apply on top.
pub fn resolve_settings(
    preset: Option<Preset>,
    overrides: &SettingsOverrides,
    stored: Option<NormalizationSettings>,
    default_preset: Option<Preset>,
) -> NormalizationSettings {
    let base = preset
        .map(Preset::settings)
        .or(stored)
        .or_else(|| default_preset.map(Preset::settings))
        .unwrap_or_default();
    overrides.apply(base)
}
