//! vf-migrate - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vf_migrate::cli::{Cli, Commands, ConfigCommands};

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(debug: bool) {
    let default = if debug { "vf_migrate=debug,info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.debug);

    match &cli.command {
        Commands::Status => commands::status::handle(&cli.global),
        Commands::Pending => commands::pending::handle(&cli.global),
        Commands::Run { upgrade } => commands::run::handle(&cli.global, upgrade),
        Commands::RunAll => commands::run::handle_all(&cli.global),
        Commands::Ajax { action, params } => commands::ajax::handle(&cli.global, action, params),
        Commands::Restore => commands::restore::handle(&cli.global),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&cli.global),
        },
    }
}
