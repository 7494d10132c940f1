//! Status command handler

use anyhow::Result;

use vf_migrate::cli::GlobalArgs;

use super::open_session;

/// Show the schema epoch, stored version and pending upgrades.
#[cfg(not(tarpaulin_include))]
pub fn handle(global: &GlobalArgs) -> Result<()> {
    let session = open_session(global)?;
    let runner = session.runner();

    println!("Schema epoch:     {}", session.epoch());
    println!("Option key:       {}", runner.version_key());
    println!(
        "Database version: {} of {}",
        runner.version(),
        runner.registry().latest_position()
    );
    println!(
        "Site snapshot:    {}{}",
        session.site().path().display(),
        if session.site().exists() { "" } else { " (missing)" }
    );

    let pending = runner.pending();
    if pending.is_empty() {
        println!("{}", session.l10n().translate(vf_migrate::l10n::NOTHING_TO_UPDATE));
    } else {
        println!("Pending upgrades:");
        for step in pending {
            println!("  {:<12} {}", step.identifier, step.label);
        }
    }
    Ok(())
}
