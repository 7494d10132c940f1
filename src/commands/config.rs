//! Config subcommands handler

use anyhow::Result;

use vf_migrate::cli::GlobalArgs;
use vf_migrate::Config;

use super::load_config;

/// Show the effective configuration as TOML, headed by the file it came from.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let path = match &global.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let toml_str = toml::to_string_pretty(&config)?;
    println!("# {}", path.display());
    print!("{}", toml_str);
    Ok(())
}
