//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use vf_migrate::{Config, JsonOptionStore, OptionStore};

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Create a temporary directory with a copy of a fixture
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let fixture_content = load_fixture(name);
    let temp_path = temp_dir.path().join(name);
    fs::write(&temp_path, fixture_content).expect("Failed to write temp fixture");
    (temp_dir, temp_path)
}

/// Config pointing at a copy of the sample site and a fresh options file
pub fn temp_site_config() -> (TempDir, Config) {
    let (temp_dir, site_path) = temp_fixture("site.json");
    let mut config = Config::default();
    config.site.data_path = site_path.to_string_lossy().into_owned();
    config.store.options_path = temp_dir
        .path()
        .join("options.json")
        .to_string_lossy()
        .into_owned();
    (temp_dir, config)
}

/// Write a stored database version into the config's options file
pub fn set_stored_version(config: &Config, key: &str, version: u32) {
    let mut store = JsonOptionStore::open(config.options_path()).expect("Failed to open options");
    store.set_u32(key, version).expect("Failed to store version");
}

/// Read a stored database version from the config's options file
pub fn stored_version(config: &Config, key: &str) -> Option<u32> {
    JsonOptionStore::open(config.options_path())
        .expect("Failed to open options")
        .get_u32(key)
        .expect("Failed to read version")
}
