//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::epoch::SchemaEpoch;
use crate::l10n::Catalog;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub l10n: Catalog,
}

/// Where the option store lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding options such as the database version
    #[serde(default = "default_options_path")]
    pub options_path: String,
}

pub fn default_options_path() -> String {
    "~/.config/vf-migrate/options.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            options_path: default_options_path(),
        }
    }
}

/// Site data the upgrades operate on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// JSON snapshot of posts, postmeta and field definitions
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Charset advertised in response content types
    #[serde(default = "default_blog_charset")]
    pub blog_charset: String,
    /// Copy the snapshot to `<file>.bak` before the first change
    #[serde(default = "default_backup")]
    pub backup: bool,
}

pub fn default_data_path() -> String {
    "site.json".to_string()
}

pub fn default_blog_charset() -> String {
    "UTF-8".to_string()
}

pub fn default_backup() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            blog_charset: default_blog_charset(),
            backup: default_backup(),
        }
    }
}

/// Host framework settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Installed ACF version; selects the schema epoch
    #[serde(default = "default_acf_version")]
    pub acf_version: String,
    /// Pretty-print responses and load unminified scripts
    #[serde(default)]
    pub debug: bool,
}

pub fn default_acf_version() -> String {
    "5.0.0".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            acf_version: default_acf_version(),
            debug: false,
        }
    }
}

impl HostConfig {
    pub fn epoch(&self) -> anyhow::Result<SchemaEpoch> {
        SchemaEpoch::from_acf_version(&self.acf_version)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.epoch().map(|_| ()).map_err(|e| format!("{:#}", e))
    }
}
