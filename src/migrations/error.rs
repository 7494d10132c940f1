//! Migration runner errors.

/// Errors that can occur while registering or executing upgrade steps.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Error performing upgrade {identifier}!")]
    UnknownStep { identifier: String },

    #[error("Upgrade {identifier} is registered more than once")]
    DuplicateStep { identifier: String },

    #[error("Upgrade {identifier} has position {position}, which must be greater than {previous}")]
    PositionNotIncreasing {
        identifier: String,
        position: u32,
        previous: u32,
    },

    #[error("Upgrade {identifier} failed: {source:#}")]
    Action {
        identifier: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to persist database version: {0:#}")]
    Store(#[source] anyhow::Error),
}

impl MigrationError {
    /// True when the caller asked for a step that does not exist.
    pub fn is_unknown_step(&self) -> bool {
        matches!(self, MigrationError::UnknownStep { .. })
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;
