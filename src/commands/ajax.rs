//! Ajax command handler

use anyhow::Result;
use std::collections::HashMap;

use vf_migrate::cli::GlobalArgs;

use super::open_session;

/// Dispatch one admin action and print the raw response.
#[cfg(not(tarpaulin_include))]
pub fn handle(global: &GlobalArgs, action: &str, params: &[(String, String)]) -> Result<()> {
    let mut session = open_session(global)?;
    let params: HashMap<String, String> = params.iter().cloned().collect();

    let response = session.dispatch(action, &params);

    println!("HTTP {}", response.status);
    println!("Content-Type: {}", response.content_type);
    println!();
    println!("{}", response.body);

    if !response.is_success() {
        anyhow::bail!("{} returned HTTP {}", action, response.status);
    }
    Ok(())
}
