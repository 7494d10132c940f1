//! CLI definitions for vf-migrate
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build clap styles.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "vf-migrate")]
#[command(about = "Validated Field database upgrades")]
#[command(
    long_about = "vf-migrate - Apply Validated Field database upgrades to an ACF site.

The installed database version is stored per ACF major version in an options
file. Each upgrade is an idempotent fixup of the site's field data; running it
advances the stored version to that upgrade's number.

QUICK START:
    vf-migrate status              Show stored version and pending upgrades
    vf-migrate pending             List pending upgrades as JSON
    vf-migrate run upgrade_1       Run a single upgrade
    vf-migrate run-all             Run every pending upgrade in order

Logging goes to stderr and honours RUST_LOG."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: ~/.config/vf-migrate/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Options file holding the database version
    #[arg(long, global = true, value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Site snapshot (posts, postmeta and field definitions as JSON)
    #[arg(long, global = true, value_name = "PATH")]
    pub site: Option<PathBuf>,

    /// Installed ACF version, selects which stored version is used
    #[arg(long, global = true, value_name = "VERSION")]
    pub acf_version: Option<String>,

    /// Pretty-print JSON and enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Do not back up the site snapshot before changing it
    #[arg(long, global = true)]
    pub no_backup: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the stored database version and pending upgrades
    #[command(long_about = "Show the schema epoch, the option key and stored version,
and how many upgrades are still pending.

EXAMPLE:
    vf-migrate status
    vf-migrate status --acf-version 4.4.12")]
    Status,

    /// List pending upgrades as JSON
    #[command(long_about = "Print the pending upgrades as the admin screen receives them:
{\"upgrades\": [{\"upgrade\": ..., \"label\": ...}], \"message\": ..., \"action\": ...}

When nothing is pending the list is empty and the message says so.")]
    Pending,

    /// Run one upgrade by name
    #[command(long_about = "Run a single upgrade and print its result messages as JSON.

The stored version is set to the upgrade's number once it succeeds. An
unknown upgrade name or a failing upgrade exits with status 1 and leaves the
stored version untouched.

EXAMPLES:
    vf-migrate run upgrade_1
    vf-migrate run upgrade_2 --site ./export.json")]
    Run {
        /// Upgrade identifier, e.g. upgrade_1
        upgrade: String,
    },

    /// Run every pending upgrade in order
    #[command(name = "run-all")]
    RunAll,

    /// Dispatch an admin AJAX action
    #[command(long_about = "Dispatch an admin AJAX action the way the settings screen does and
print the status line, content type and body.

Actions are only registered while upgrades are pending.

EXAMPLES:
    vf-migrate ajax acf_vf_get_upgrades
    vf-migrate ajax acf_vf_do_upgrade -p upgrade=upgrade_1")]
    Ajax {
        /// Action name, e.g. acf_vf_get_upgrades
        action: String,
        /// Request parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Restore the site snapshot from its backup
    #[command(long_about = "Copy <site>.bak back over the site snapshot and delete the backup.

The backup is taken before the first change an upgrade makes. Restoring it
does not change the stored database version; run the upgrades again or
edit the options file if needed.")]
    Restore,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the effective configuration (file plus flags) in TOML format.

EXAMPLE:
    vf-migrate config show")]
    Show,
}

/// Parse a `key=value` request parameter.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", raw)),
    }
}
