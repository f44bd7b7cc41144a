use std::path::{Path, PathBuf};

use emerald_tone::NormalizationSettings;

use crate::error::StoreError;

/// Custom normalization settings persisted as YAML.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored settings, clamped into range. Defaults if nothing is stored.
    pub async fn load(&self) -> Result<NormalizationSettings, StoreError> {
        Ok(self.load_stored().await?.unwrap_or_default())
    }

    /// Stored settings, or `None` if nothing has been saved yet.
    pub async fn load_stored(&self) -> Result<Option<NormalizationSettings>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No stored settings");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let settings: NormalizationSettings = serde_yaml::from_str(&content)?;
        Ok(Some(settings.clamped()))
    }

    /// Write settings, replacing the file atomically.
    pub async fn save(&self, settings: &NormalizationSettings) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(&settings.clamped())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, yaml).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::info!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    /// Remove stored settings so defaults apply again.
    pub async fn reset(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
