//! Validated Field database upgrades
//!
//! Tracks the database version of a Validated Field install per ACF major
//! version, lists the upgrades that still need to run, and applies them one
//! at a time while advancing the stored version.

pub mod admin;
pub mod cli;
pub mod config;
pub mod epoch;
pub mod files;
pub mod l10n;
pub mod migrations;
pub mod options;
pub mod session;
pub mod site;
pub mod upgrades;

pub use config::Config;
pub use epoch::SchemaEpoch;
pub use migrations::{MigrationError, MigrationStep, Registry, Runner};
pub use options::{JsonOptionStore, MemoryOptionStore, OptionStore};
pub use session::Session;
pub use site::{FieldStore, SiteSnapshot};
pub use upgrades::UpgradeContext;
