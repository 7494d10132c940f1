//! Run and run-all command handlers

use anyhow::Result;

use vf_migrate::admin::UpgradeResult;
use vf_migrate::cli::GlobalArgs;
use vf_migrate::l10n;

use super::{open_session, print_json};

/// Run a single upgrade and print its wrapped result.
#[cfg(not(tarpaulin_include))]
pub fn handle(global: &GlobalArgs, upgrade: &str) -> Result<()> {
    let mut session = open_session(global)?;
    let outcome = session.run(upgrade)?;
    let body = vec![UpgradeResult::new(outcome, session.l10n())];
    print_json(&body, session.response_options().pretty)
}

/// Run every pending upgrade, printing results for those that completed.
#[cfg(not(tarpaulin_include))]
pub fn handle_all(global: &GlobalArgs) -> Result<()> {
    let mut session = open_session(global)?;
    if session.pending_signal().is_none() {
        eprintln!("{}", session.l10n().translate(l10n::NOTHING_TO_UPDATE));
        return Ok(());
    }

    let batch = session.run_pending();
    let body: Vec<UpgradeResult> = batch
        .completed
        .into_iter()
        .map(|outcome| UpgradeResult::new(outcome, session.l10n()))
        .collect();
    print_json(&body, session.response_options().pretty)?;

    match batch.error {
        Some(error) => Err(error.into()),
        None => {
            eprintln!("{}", session.l10n().translate(l10n::UPGRADE_COMPLETE));
            Ok(())
        }
    }
}
