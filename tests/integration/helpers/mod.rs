//! Integration test helpers

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Scratch directory holding a copy of the sample site.
///
/// `config` does not exist so the user's real configuration never leaks in.
pub struct Workspace {
    _temp: TempDir,
    pub config: PathBuf,
    pub options: PathBuf,
    pub site: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let site = temp.path().join("site.json");
        fs::copy(fixtures_dir().join("site.json"), &site).expect("Failed to copy site fixture");
        Self {
            config: temp.path().join("config.toml"),
            options: temp.path().join("options.json"),
            site,
            _temp: temp,
        }
    }

    /// `vf-migrate` with the workspace's config, options and site flags set.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vf-migrate"));
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config)
            .arg("--options")
            .arg(&self.options)
            .arg("--site")
            .arg(&self.site);
        cmd
    }

    pub fn read_options(&self) -> serde_json::Value {
        read_json(&self.options)
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Failed to read file"))
        .expect("Failed to parse JSON")
}
