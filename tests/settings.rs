use std::path::Path;
use tempfile::tempdir;
use websearch::settings::Settings;

#[test]
fn missing_settings_use_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.engines_file, "engines.json");
    assert_eq!(settings.usage_file.as_deref(), Some("usage.json"));
    assert!(!settings.debug_logging);
}

#[test]
fn partial_settings_fill_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"debug_logging": true, "usage_file": null}"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert!(settings.debug_logging);
    assert_eq!(settings.usage_file, None);
    assert_eq!(settings.usage_path(&path), None);
    assert_eq!(settings.usage_weight, 0.5);
}

#[test]
fn paths_resolve_next_to_settings_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut settings = Settings::default();
    settings.data_dir = Some("data/icons".into());
    settings.log_file = Some("websearch.log".into());
    settings.save(&path).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.engines_path(&path), dir.path().join("engines.json"));
    assert_eq!(settings.data_path(&path), dir.path().join(Path::new("data").join("icons")));
    assert_eq!(settings.usage_path(&path), Some(dir.path().join("usage.json")));
    assert_eq!(settings.log_path(&path), Some(dir.path().join("websearch.log")));
}

#[test]
fn default_data_dir_is_icons() {
    let settings = Settings::default();
    assert_eq!(
        settings.data_path(Path::new("/cfg/settings.json")),
        Path::new("/cfg/icons")
    );
}
