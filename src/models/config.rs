use std::path::{Path, PathBuf};

use emerald_tone::Preset;
use serde::{Deserialize, Serialize};

use crate::codec::{EncodeOptions, OutputFormat};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Preset used when neither a preset nor overrides are given and no
    /// custom settings have been stored
    #[serde(default)]
    pub default_preset: Option<Preset>,

    /// Where custom settings are persisted
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("tierra-settings.yaml")
}

/// Encoding of normalized images
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Longest side in pixels, unset for full size
    #[serde(default)]
    pub max_dimension: Option<u32>,
}

fn default_quality() -> u8 {
    92
}

/// Valid JPEG quality range.
const QUALITY_RANGE: std::ops::RangeInclusive<u8> = 1..=100;

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quality: default_quality(),
            max_dimension: None,
        }
    }
}

impl OutputConfig {
    /// Encoder options, with quality forced into 1-100.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::final_output()
            .format(self.format)
            .quality(self.quality.clamp(*QUALITY_RANGE.start(), *QUALITY_RANGE.end()))
            .max_dimension(self.max_dimension)
    }
}

/// Batch run behavior
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BatchConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// What a batch does when one file fails
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing file
    #[default]
    Abort,
    /// Record the failure and keep going
    SkipAndContinue,
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;

        if !QUALITY_RANGE.contains(&config.output.quality) {
            let clamped = config
                .output
                .quality
                .clamp(*QUALITY_RANGE.start(), *QUALITY_RANGE.end());
            tracing::warn!(
                quality = config.output.quality,
                using = clamped,
                "Output quality out of range 1-100, clamping"
            );
            config.output.quality = clamped;
        }

        tracing::info!(
            default_preset = ?config.default_preset,
            format = %config.output.format,
            failure_policy = ?config.batch.failure_policy,
            "Loaded configuration"
        );
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_preset: None,
            settings_file: default_settings_file(),
            output: OutputConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}
