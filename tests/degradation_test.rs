// Degradation Tests
//
// Store lookups must fall back to "no experiments" instead of failing when
// the stored state is missing, corrupt or oddly shaped.

use switchboard::{ConfigStore, FileStore, MemoryStore, SettingsStore, CONFIG_JSON_KEY};
use tempfile::TempDir;

#[test]
fn test_fresh_store_has_no_state() {
    let store = ConfigStore::new(MemoryStore::new());

    assert_eq!(store.server_url(), None);
    assert_eq!(store.config_json(), None);
    assert!(store.experiments().is_empty());
    assert!(store.active_experiments().is_empty());
    assert!(!store.is_in_experiment("anything"));
    assert!(!store.has_experiment_values("anything"));
    assert!(store.experiment_values("anything").is_none());
}

#[test]
fn test_reads_are_idempotent() {
    let store = ConfigStore::new(MemoryStore::new());
    assert_eq!(store.server_url(), store.server_url());

    store.set_server_url("https://example.com/config");
    let first = store.server_url();
    let second = store.server_url();
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("https://example.com/config"));
}

#[test]
fn test_badly_shaped_entries() {
    let store = ConfigStore::new(MemoryStore::new());
    store.set_config_json(
        r#"{
            "flag-as-string": {"isActive": "true", "values": {"a": 1}},
            "missing-flag": {"values": null},
            "list-values": {"isActive": true, "values": [1, 2, 3]},
            "plain-number": 7
        }"#,
    );

    assert!(!store.is_in_experiment("flag-as-string"));
    assert!(store.has_experiment_values("flag-as-string"));

    assert!(!store.is_in_experiment("missing-flag"));
    assert!(!store.has_experiment_values("missing-flag"));

    assert!(store.is_in_experiment("list-values"));
    assert!(!store.has_experiment_values("list-values"));
    assert!(store.experiment_values("list-values").is_none());

    assert!(!store.is_in_experiment("plain-number"));

    let active: Vec<String> = store.active_experiments().into_iter().collect();
    assert_eq!(active, vec!["list-values"]);
}

#[test]
fn test_truncated_json_after_valid_json() {
    let store = ConfigStore::new(MemoryStore::new());
    store.set_config_json(r#"{"exp":{"isActive":true}}"#);
    assert!(store.is_in_experiment("exp"));

    store.set_config_json(r#"{"exp":{"isActive":tr"#);
    assert!(!store.is_in_experiment("exp"));
    assert_eq!(store.config_json().as_deref(), Some(r#"{"exp":{"isActive":tr"#));
}

#[test]
fn test_corrupt_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings = FileStore::open(temp_dir.path(), "corrupt").unwrap();
    std::fs::write(settings.path(), b"\x00\xffnot json at all").unwrap();

    let store = ConfigStore::new(settings);
    assert_eq!(store.config_json(), None);
    assert!(store.active_experiments().is_empty());

    store.set_config_json(r#"{"recovered":{"isActive":true}}"#);

    let reopened = FileStore::open(temp_dir.path(), "corrupt").unwrap();
    assert!(reopened.get_string(CONFIG_JSON_KEY).unwrap().is_some());
    assert!(ConfigStore::new(reopened).is_in_experiment("recovered"));
}

#[test]
fn test_settings_file_with_non_string_values() {
    let temp_dir = TempDir::new().unwrap();
    let settings = FileStore::open(temp_dir.path(), "odd").unwrap();
    std::fs::write(settings.path(), r#"{"dynamic-config": {"exp": {"isActive": true}}}"#).unwrap();

    // The namespace file must map keys to strings; anything else reads as empty
    let store = ConfigStore::new(settings);
    assert_eq!(store.config_json(), None);
    assert!(!store.is_in_experiment("exp"));
}
