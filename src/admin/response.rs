//! JSON bodies returned to the admin screen.

use serde::{Deserialize, Serialize};

use crate::l10n::{self, Catalog};
use crate::migrations::{PendingStep, StepOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeEntry {
    pub upgrade: String,
    pub label: String,
}

/// Body of `acf_vf_get_upgrades`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeList {
    pub upgrades: Vec<UpgradeEntry>,
    pub message: String,
    pub action: String,
}

impl UpgradeList {
    /// An empty list carries the "nothing to update" message instead of the
    /// call to action.
    pub fn new(pending: Vec<PendingStep>, l10n: &Catalog) -> Self {
        let message = if pending.is_empty() {
            l10n.translate(l10n::NOTHING_TO_UPDATE)
        } else {
            l10n.translate(l10n::UPGRADES_NEEDED)
        };
        Self {
            upgrades: pending
                .into_iter()
                .map(|p| UpgradeEntry {
                    upgrade: p.identifier,
                    label: p.label,
                })
                .collect(),
            message,
            action: l10n.translate(l10n::UPGRADE_ACTION),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText {
    pub text: String,
}

/// One executed upgrade inside the `acf_vf_do_upgrade` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeResult {
    pub messages: Vec<MessageText>,
    pub id: String,
}

impl UpgradeResult {
    pub fn new(outcome: StepOutcome, l10n: &Catalog) -> Self {
        let mut messages: Vec<MessageText> = outcome
            .messages
            .into_iter()
            .map(|text| MessageText { text })
            .collect();
        if messages.is_empty() {
            messages.push(MessageText {
                text: l10n.translate(l10n::NOTHING_TO_UPDATE),
            });
        }
        Self {
            messages,
            id: outcome.id,
        }
    }
}

/// Status, content type and body as the transport should emit them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AjaxResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl AjaxResponse {
    pub fn json<T: Serialize>(value: &T, charset: &str, pretty: bool) -> Self {
        let body = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        match body {
            Ok(body) => Self {
                status: 200,
                content_type: format!("application/json; charset={}", charset),
                body,
            },
            Err(e) => Self::text(500, format!("Failed to encode response: {}", e), charset),
        }
    }

    pub fn text(status: u16, body: impl Into<String>, charset: &str) -> Self {
        Self {
            status,
            content_type: format!("text/plain; charset={}", charset),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
