//! Validated Field database upgrades.
//!
//! Each upgrade lives in its own file and exposes `IDENTIFIER`, `POSITION`,
//! `LABEL` and `run()`. Upgrades must leave already-fixed data untouched and
//! report nothing for it.

pub mod read_only;
pub mod relationship_helpers;

use crate::l10n::Catalog;
use crate::migrations::{MigrationStep, Registry, Result};
use crate::site::FieldStore;

/// What an upgrade gets to work with.
pub struct UpgradeContext<S> {
    pub fields: S,
    pub l10n: Catalog,
}

impl<S: FieldStore> UpgradeContext<S> {
    pub fn new(fields: S, l10n: Catalog) -> Self {
        Self { fields, l10n }
    }
}

/// All upgrades in the order they must be applied, labels translated.
pub fn registry<S: FieldStore>(l10n: &Catalog) -> Result<Registry<UpgradeContext<S>>> {
    Registry::new()
        .with(MigrationStep::new(
            relationship_helpers::IDENTIFIER,
            relationship_helpers::POSITION,
            l10n.translate(relationship_helpers::LABEL),
            relationship_helpers::run::<S>,
        ))?
        .with(MigrationStep::new(
            read_only::IDENTIFIER,
            read_only::POSITION,
            l10n.translate(read_only::LABEL),
            read_only::run::<S>,
        ))
}
