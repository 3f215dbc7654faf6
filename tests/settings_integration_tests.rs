//! Integration tests for the settings store.
//!
//! These tests verify:
//! - First-run generation of the bundled default settings
//! - Loading and validation round trips
//! - Exhaustive validation reporting

use armaqdl::models::{BuildTool, Location, Settings};
use armaqdl::settings::{self, SettingsStore};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

fn create_test_store() -> (TempDir, SettingsStore) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let store = SettingsStore::new(&dir);
    (temp_dir, store)
}

#[test]
fn test_generate_then_load_default_template() {
    let (_temp_dir, store) = create_test_store();
    store.generate().unwrap();

    let settings = store.load().unwrap();

    // The bundled template ships with usable locations and build tools.
    assert!(!settings.locations.is_empty());
    assert!(settings.build.contains_key("hemtt"));
    assert!(settings.server.is_some());
    assert_eq!(settings.profile, "Dev");
    assert_eq!(settings.log.open_delay, 3);
}

#[test]
fn test_generate_does_not_clobber_existing_settings() {
    let (_temp_dir, store) = create_test_store();
    fs::create_dir_all(store.config_dir()).unwrap();
    fs::write(
        store.settings_path(),
        "profile = \"Mine\"\n\n[server]\nport = 2402\n",
    )
    .unwrap();

    store.generate().unwrap();

    let settings = store.load().unwrap();
    assert_eq!(settings.profile, "Mine");
    assert_eq!(settings.server.unwrap().port, 2402);
}

#[test]
fn test_generate_replaces_empty_file() {
    let (_temp_dir, store) = create_test_store();
    fs::create_dir_all(store.config_dir()).unwrap();
    fs::write(store.settings_path(), "").unwrap();

    store.generate().unwrap();

    assert!(store.load().is_ok());
}

#[test]
fn test_load_missing_file_fails() {
    let (_temp_dir, store) = create_test_store();
    assert!(store.load().is_err());
}

#[test]
fn test_load_malformed_toml_fails() {
    let (_temp_dir, store) = create_test_store();
    fs::create_dir_all(store.config_dir()).unwrap();
    fs::write(store.settings_path(), "[locations\npath=").unwrap();
    assert!(store.load().is_err());
}

#[test]
fn test_validate_complete_settings() {
    let mut s = Settings::default();
    s.locations.insert(
        "p".to_string(),
        Location {
            path: "P:\\".to_string(),
            build: true,
            launch_type: None,
        },
    );
    s.build.insert(
        "make".to_string(),
        BuildTool {
            presence: "Makefile".to_string(),
            command: vec!["make".to_string()],
        },
    );

    assert!(settings::validate(&s));
}

#[test]
fn test_validate_fails_on_each_missing_field() {
    // Location without a path
    let mut s = Settings::default();
    s.locations.insert(
        "p".to_string(),
        Location {
            path: String::new(),
            build: false,
            launch_type: None,
        },
    );
    assert!(!settings::validate(&s));

    // Build tool without a presence marker
    let mut s = Settings::default();
    s.build.insert(
        "t".to_string(),
        BuildTool {
            presence: String::new(),
            command: vec!["make".to_string()],
        },
    );
    assert!(!settings::validate(&s));

    // Build tool without a command
    let mut s = Settings::default();
    s.build.insert(
        "t".to_string(),
        BuildTool {
            presence: "Makefile".to_string(),
            command: vec![],
        },
    );
    assert!(!settings::validate(&s));

    // Missing server section
    let s = Settings {
        server: None,
        ..Settings::default()
    };
    assert!(!settings::validate(&s));
}

#[test]
fn test_settings_toml_round_trip() {
    let (_temp_dir, store) = create_test_store();
    store.generate().unwrap();
    let settings = store.load().unwrap();

    let serialized = toml::to_string(&settings).unwrap();
    let reparsed: Settings = toml::from_str(&serialized).unwrap();

    assert_eq!(
        settings.locations.keys().collect::<Vec<_>>(),
        reparsed.locations.keys().collect::<Vec<_>>()
    );
    assert_eq!(settings.profile, reparsed.profile);
}
