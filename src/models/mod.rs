pub mod config;
pub mod overrides;
pub mod processed;

pub use config::{AppConfig, BatchConfig, FailurePolicy, OutputConfig};
pub use overrides::{resolve_settings, SettingsOverrides};
pub use processed::{EncodedImage, ImageId, ProcessedImage};
