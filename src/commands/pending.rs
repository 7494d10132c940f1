//! Pending command handler

use anyhow::Result;

use vf_migrate::cli::GlobalArgs;

use super::{open_session, print_json};

/// Print the pending upgrade list as the admin screen receives it.
#[cfg(not(tarpaulin_include))]
pub fn handle(global: &GlobalArgs) -> Result<()> {
    let session = open_session(global)?;
    print_json(&session.upgrade_list(), session.response_options().pretty)
}
