//! Named normalization presets.

use std::fmt;
use std::str::FromStr;

use super::NormalizationSettings;

/// A named, immutable set of [`NormalizationSettings`].
///
/// - **Studio**: clean and bright, neutral contrast boost, no vignette
/// - **Editorial**: darker and punchier, with a vignette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Preset {
    Studio,
    Editorial,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 2] = [Preset::Studio, Preset::Editorial];

    /// Settings this preset stands for.
    pub const fn settings(self) -> NormalizationSettings {
        match self {
            Preset::Studio => NormalizationSettings {
                target_brightness: 135.0,
                target_contrast: 50.0,
                auto_white_balance: true,
                enhance_emeralds: true,
                vignette_strength: 0.0,
            },
            Preset::Editorial => NormalizationSettings {
                target_brightness: 115.0,
                target_contrast: 65.0,
                auto_white_balance: true,
                enhance_emeralds: true,
                vignette_strength: 25.0,
            },
        }
    }

    /// Lowercase identifier, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Preset::Studio => "studio",
            Preset::Editorial => "editorial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Studio => "Studio",
            Preset::Editorial => "Editorial",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Studio => "Bright, neutral catalog look without vignette",
            Preset::Editorial => "Darker, higher-contrast look with a soft vignette",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPresetError(pub String);

impl fmt::Display for UnknownPresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown preset '{}' (expected 'studio' or 'editorial')",
            self.0
        )
    }
}

impl std::error::Error for UnknownPresetError {}

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

/// Mode the UI is in, inferred from the live settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Studio,
    Editorial,
    /// Settings differ from every preset
    Custom,
}

impl PresetKind {
    /// Compare settings field-for-field against each preset.
    pub fn detect(settings: &NormalizationSettings) -> Self {
        match Preset::ALL.into_iter().find(|p| p.settings() == *settings) {
            Some(Preset::Studio) => PresetKind::Studio,
            Some(Preset::Editorial) => PresetKind::Editorial,
            None => PresetKind::Custom,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PresetKind::Studio => "Studio",
            PresetKind::Editorial => "Editorial",
            PresetKind::Custom => "Custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editorial_is_darker_and_contrastier() {
        let studio = Preset::Studio.settings();
        let editorial = Preset::Editorial.settings();
        assert!(editorial.target_brightness < studio.target_brightness);
        assert!(editorial.target_contrast > studio.target_contrast);
        assert_eq!(editorial.vignette_strength, 25.0);
        assert_eq!(studio.vignette_strength, 0.0);
    }

    #[test]
    fn test_presets_within_ranges() {
        for preset in Preset::ALL {
            let settings = preset.settings();
            assert_eq!(settings.clamped(), settings, "{preset} out of range");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("studio".parse::<Preset>(), Ok(Preset::Studio));
        assert_eq!("Editorial".parse::<Preset>(), Ok(Preset::Editorial));
        assert_eq!(" EDITORIAL ".parse::<Preset>(), Ok(Preset::Editorial));
        assert_eq!(
            "moody".parse::<Preset>(),
            Err(UnknownPresetError("moody".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_name() {
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            PresetKind::detect(&Preset::Studio.settings()),
            PresetKind::Studio
        );
        assert_eq!(
            PresetKind::detect(&Preset::Editorial.settings()),
            PresetKind::Editorial
        );
        let edited = Preset::Studio.settings().enhance_emeralds(false);
        assert_eq!(PresetKind::detect(&edited), PresetKind::Custom);
        assert_eq!(PresetKind::Custom.label(), "Custom");
    }

    #[test]
    fn test_unknown_preset_message() {
        assert_eq!(
            UnknownPresetError("x".into()).to_string(),
            "unknown preset 'x' (expected 'studio' or 'editorial')"
        );
    }
}
