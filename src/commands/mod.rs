//! Command handlers for the vf-migrate CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod ajax;
pub mod config;
pub mod pending;
pub mod restore;
pub mod run;
pub mod status;

use anyhow::Result;
use serde::Serialize;

use vf_migrate::cli::GlobalArgs;
use vf_migrate::{Config, Session};

/// Load the config file and apply command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, global);
    config
        .host
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    Ok(config)
}

/// Flags win over the file.
pub fn apply_overrides(config: &mut Config, global: &GlobalArgs) {
    if let Some(path) = &global.options {
        config.store.options_path = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &global.site {
        config.site.data_path = path.to_string_lossy().into_owned();
    }
    if let Some(version) = &global.acf_version {
        config.host.acf_version = version.clone();
    }
    if global.debug {
        config.host.debug = true;
    }
    if global.no_backup {
        config.site.backup = false;
    }
}

pub fn open_session(global: &GlobalArgs) -> Result<Session> {
    let config = load_config(global)?;
    Session::open(&config)
}

/// Print `value` as JSON on stdout, pretty in debug mode.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
