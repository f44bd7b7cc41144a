//! Settings store and configuration tests against real files.

mod common;

use emerald_tone::{NormalizationSettings, Preset, PresetKind};
use pretty_assertions::assert_eq;
use tierra_studio::models::{resolve_settings, AppConfig, FailurePolicy, SettingsOverrides};
use tierra_studio::services::SettingsStore;

#[tokio::test]
async fn test_custom_settings_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    let custom = Preset::Studio.settings().vignette_strength(12.0);

    SettingsStore::new(&path).save(&custom).await.unwrap();

    let reloaded = SettingsStore::new(&path).load().await.unwrap();
    assert_eq!(reloaded, custom);
    assert_eq!(reloaded.preset_kind(), PresetKind::Custom);
}

#[tokio::test]
async fn test_saved_preset_is_detected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.yaml"));

    store.save(&Preset::Editorial.settings()).await.unwrap();

    assert_eq!(
        store.load().await.unwrap().preset_kind(),
        PresetKind::Editorial
    );
}

#[tokio::test]
async fn test_stored_settings_feed_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.yaml"));
    let custom = NormalizationSettings::new().target_contrast(70.0);
    store.save(&custom).await.unwrap();

    let stored = store.load_stored().await.unwrap();
    let overrides = SettingsOverrides {
        no_emeralds: true,
        ..Default::default()
    };
    let settings = resolve_settings(None, &overrides, stored, Some(Preset::Editorial));

    assert_eq!(settings.target_contrast, 70.0);
    assert!(!settings.enhance_emeralds);
}

#[test]
fn test_config_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::fixtures::write_file(
        dir.path(),
        "config.yaml",
        b"default_preset: editorial\nbatch:\n  failure_policy: skip_and_continue\n",
    );

    let config = AppConfig::load(&path);
    assert_eq!(config.default_preset, Some(Preset::Editorial));
    assert_eq!(config.batch.failure_policy, FailurePolicy::SkipAndContinue);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::fixtures::write_file(dir.path(), "config.yaml", b"output: [1, 2");

    assert_eq!(AppConfig::load(&path), AppConfig::default());
}
