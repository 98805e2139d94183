use std::path::PathBuf;
use tsplit::config::{AppConfig, ConfigManager};
use tsplit::{InsufficientDataPolicy, SplitPoint, TsplitError};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tsplit-{}-{}", std::process::id(), name))
}

#[test]
fn test_load_toml_date_split() {
    let path = temp_path("date.toml");
    std::fs::write(
        &path,
        r#"
[split]
date = "2021-01-03 02:00"
freq = "1h"

[windows]
prediction_length = 6
windows = 4
distance = 3
policy = "strict"
"#,
    )
    .unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert!(matches!(
        config.split.to_split_point().unwrap(),
        SplitPoint::Date(_)
    ));
    let params = config.windows.to_params();
    assert_eq!(params.prediction_length(), 6);
    assert_eq!(params.window_count(), 4);
    assert_eq!(params.effective_distance(), 3);
    assert_eq!(params.insufficient_data_policy(), InsufficientDataPolicy::Strict);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_json_with_section_defaults() {
    let path = temp_path("offset.json");
    std::fs::write(&path, r#"{ "split": { "offset": -12 } }"#).unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.split.to_split_point().unwrap(), SplitPoint::Offset(-12));
    assert_eq!(config.windows, AppConfig::default().windows);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_file_keeps_previous_config() {
    let path = temp_path("both.toml");
    std::fs::write(
        &path,
        "[split]\noffset = 3\ndate = \"2021-01-01\"\nfreq = \"D\"\n",
    )
    .unwrap();

    let manager = ConfigManager::new();
    assert!(matches!(
        manager.load_from_file(&path),
        Err(TsplitError::Configuration(_))
    ));
    assert_eq!(manager.get(), AppConfig::default());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_save_then_load_round_trip() {
    let path = temp_path("saved.toml");
    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.windows.prediction_length = 12;
            config.windows.max_history = Some(48);
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(reloaded.get(), manager.get());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_update_rejects_invalid_windows() {
    let manager = ConfigManager::new();
    let result = manager.update(|config| config.windows.windows = 0);

    assert!(matches!(result, Err(TsplitError::Configuration(_))));
    assert_eq!(manager.get().windows.windows, 1);
}
