//! Sequential, watermark-gated upgrade runner.
//!
//! Steps are registered in order, each with an explicit integer position.
//! The option store holds the position of the last applied step (the
//! watermark); absent means 0. Executing a step sets the watermark to that
//! step's position, so positions may skip numbers, but any step whose
//! position is at or below the watermark is never reported as pending.
//!
//! To add an upgrade:
//! 1. Write the action in `crate::upgrades`
//! 2. Register it in `crate::upgrades::registry()` with the next position

mod error;

pub use error::{MigrationError, Result};

use tracing::{debug, info, warn};

use crate::epoch::SchemaEpoch;
use crate::options::OptionStore;

/// Action run by a step. Must be safe to run more than once.
pub type UpgradeFn<C> = fn(&mut C) -> anyhow::Result<Vec<String>>;

/// A single registered upgrade.
pub struct MigrationStep<C> {
    pub identifier: String,
    pub position: u32,
    pub label: String,
    action: UpgradeFn<C>,
}

impl<C> MigrationStep<C> {
    pub fn new(
        identifier: impl Into<String>,
        position: u32,
        label: impl Into<String>,
        action: UpgradeFn<C>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            position,
            label: label.into(),
            action,
        }
    }
}

impl<C> std::fmt::Debug for MigrationStep<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStep")
            .field("identifier", &self.identifier)
            .field("position", &self.position)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Ordered, validated list of steps.
pub struct Registry<C> {
    steps: Vec<MigrationStep<C>>,
}

impl<C> std::fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.steps).finish()
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<C> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Identifiers must be unique and positions strictly
    /// increasing, starting above 0.
    pub fn register(&mut self, step: MigrationStep<C>) -> Result<()> {
        if self.get(&step.identifier).is_some() {
            return Err(MigrationError::DuplicateStep {
                identifier: step.identifier,
            });
        }

        let previous = self.steps.last().map(|s| s.position).unwrap_or(0);
        if step.position <= previous {
            return Err(MigrationError::PositionNotIncreasing {
                identifier: step.identifier,
                position: step.position,
                previous,
            });
        }
        if step.position > previous + 1 {
            debug!(
                identifier = %step.identifier,
                position = step.position,
                previous,
                "upgrade positions are not contiguous"
            );
        }

        self.steps.push(step);
        Ok(())
    }

    /// Builder-style `register`.
    pub fn with(mut self, step: MigrationStep<C>) -> Result<Self> {
        self.register(step)?;
        Ok(self)
    }

    /// Exact identifier lookup.
    pub fn get(&self, identifier: &str) -> Option<&MigrationStep<C>> {
        self.steps.iter().find(|s| s.identifier == identifier)
    }

    pub fn steps(&self) -> &[MigrationStep<C>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Position of the final step, i.e. the watermark once everything ran.
    pub fn latest_position(&self) -> u32 {
        self.steps.last().map(|s| s.position).unwrap_or(0)
    }
}

/// A step that has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStep {
    pub identifier: String,
    pub label: String,
}

/// Raised by a runner with work left to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSignal {
    pub pending: usize,
    pub version: u32,
}

/// Messages produced by one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub id: String,
    pub messages: Vec<String>,
}

/// Outcome of running every pending step in order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub completed: Vec<StepOutcome>,
    pub error: Option<MigrationError>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Owns the registry, the option store and the watermark for one epoch.
pub struct Runner<C> {
    registry: Registry<C>,
    store: Box<dyn OptionStore>,
    key: String,
    version: u32,
}

impl<C> Runner<C> {
    /// Read the watermark for `epoch` from `store` (0 when absent).
    pub fn new(
        registry: Registry<C>,
        store: Box<dyn OptionStore>,
        epoch: SchemaEpoch,
    ) -> anyhow::Result<Self> {
        let key = epoch.version_key();
        let version = store.get_u32(&key)?.unwrap_or(0);
        debug!(%key, version, total = registry.len(), "loaded database version");
        Ok(Self {
            registry,
            store,
            key,
            version,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn version_key(&self) -> &str {
        &self.key
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    pub fn store(&self) -> &dyn OptionStore {
        self.store.as_ref()
    }

    fn pending_steps(&self) -> impl Iterator<Item = &MigrationStep<C>> {
        let version = self.version;
        self.registry
            .steps()
            .iter()
            .filter(move |s| s.position > version)
    }

    /// Steps after the watermark, in registration order.
    pub fn pending(&self) -> Vec<PendingStep> {
        self.pending_steps()
            .map(|s| PendingStep {
                identifier: s.identifier.clone(),
                label: s.label.clone(),
            })
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_steps().next().is_some()
    }

    /// `Some` while there is work for the administrator to trigger.
    pub fn pending_signal(&self) -> Option<PendingSignal> {
        let pending = self.pending_steps().count();
        (pending > 0).then_some(PendingSignal {
            pending,
            version: self.version,
        })
    }

    /// Run the step named `identifier` and advance the watermark to its
    /// position. The watermark is untouched when anything fails.
    pub fn execute(&mut self, identifier: &str, ctx: &mut C) -> Result<StepOutcome> {
        let Some(step) = self.registry.get(identifier) else {
            warn!(identifier, "unknown upgrade requested");
            return Err(MigrationError::UnknownStep {
                identifier: identifier.to_string(),
            });
        };
        let position = step.position;

        let messages = (step.action)(ctx).map_err(|source| {
            warn!(identifier, error = %source, "upgrade failed");
            MigrationError::Action {
                identifier: identifier.to_string(),
                source,
            }
        })?;

        self.store
            .set_u32(&self.key, position)
            .map_err(MigrationError::Store)?;
        info!(
            identifier,
            from = self.version,
            to = position,
            messages = messages.len(),
            "upgrade applied"
        );
        self.version = position;

        Ok(StepOutcome {
            id: identifier.to_string(),
            messages,
        })
    }

    /// Execute every pending step in order, stopping at the first failure.
    pub fn execute_pending(&mut self, ctx: &mut C) -> BatchOutcome {
        let identifiers: Vec<String> = self
            .pending_steps()
            .map(|s| s.identifier.clone())
            .collect();

        let mut completed = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            match self.execute(&identifier, ctx) {
                Ok(outcome) => completed.push(outcome),
                Err(error) => {
                    return BatchOutcome {
                        completed,
                        error: Some(error),
                    }
                }
            }
        }

        BatchOutcome {
            completed,
            error: None,
        }
    }
}
