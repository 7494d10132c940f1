//! Unit tests for config module

use std::fs;
use tempfile::TempDir;

use vf_migrate::{Config, SchemaEpoch};

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.store.options_path, "~/.config/vf-migrate/options.json");
    assert_eq!(config.site.data_path, "site.json");
    assert_eq!(config.site.blog_charset, "UTF-8");
    assert!(config.site.backup);
    assert_eq!(config.host.acf_version, "5.0.0");
    assert!(!config.host.debug);
    assert!(config.l10n.messages.is_empty());
    assert_eq!(config.host.epoch().unwrap(), SchemaEpoch::V5);
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn sections_default_when_missing() {
    let toml_str = r#"
[host]
acf_version = "4.4.12"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.host.epoch().unwrap(), SchemaEpoch::V4);
    assert!(!config.host.debug);
    assert_eq!(config.site.data_path, "site.json");
}

#[test]
fn translations_parse_from_toml() {
    let toml_str = r#"
[l10n.messages]
"Nothing to update!" = "Nichts zu aktualisieren!"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(
        config.l10n.translate("Nothing to update!"),
        "Nichts zu aktualisieren!"
    );
}

#[test]
fn options_path_expands_home() {
    let config = Config::default();
    let path = config.options_path();
    assert!(!path.to_string_lossy().starts_with('~'));
    assert!(path.ends_with(".config/vf-migrate/options.json"));
}

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn invalid_acf_version_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[host]\nacf_version = \"pro\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid config"));
}

#[test]
fn save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.host.debug = true;
    config.site.blog_charset = "ISO-8859-1".to_string();

    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}
