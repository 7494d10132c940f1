//! Restore command handler

use anyhow::Result;

use vf_migrate::cli::GlobalArgs;
use vf_migrate::files::backup::restore_from_backup;

use super::load_config;

/// Put the site snapshot back from `<site>.bak`.
#[cfg(not(tarpaulin_include))]
pub fn handle(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let path = config.site_path();
    restore_from_backup(&path)?;
    println!("Restored {}", path.display());
    Ok(())
}
