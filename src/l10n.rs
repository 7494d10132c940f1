//! User-facing strings and their translations.
//!
//! Message ids are the English source strings. Placeholders use the
//! positional `%1$s` form so translators can reorder them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NOTHING_TO_UPDATE: &str = "Nothing to update!";
pub const UPGRADES_NEEDED: &str =
    "The following database updates are needed for Validated Field to function correctly.";
pub const UPGRADE_ACTION: &str = "Upgrade";
pub const UPGRADE_COMPLETE: &str = "Database upgrades completed! Your browser will now refresh.";
pub const UPGRADE_ERROR: &str = "Error performing upgrade %1$s!";
pub const UPDATED_RELATIONSHIP_VALUES: &str = "Updated values for field %1$s, post %2$s.";
pub const UPDATED_READ_ONLY: &str = "Updated read-only settings for field %1$s.";
pub const TAB_LABEL: &str = "Database Updates!";
pub const TAB_MESSAGE_LABEL: &str = "Database Updates Message";

/// Translation catalog. Missing entries fall back to the message id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, msgid: &str, translation: &str) -> Self {
        self.messages
            .insert(msgid.to_string(), translation.to_string());
        self
    }

    pub fn translate(&self, msgid: &str) -> String {
        self.messages
            .get(msgid)
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }

    /// Translate and substitute `%N$s` (1-based) and bare `%s` placeholders.
    pub fn format(&self, msgid: &str, args: &[&str]) -> String {
        substitute(&self.translate(msgid), args)
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut rest = template;

    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx + 1..];

        if let Some(after) = tail.strip_prefix('s') {
            out.push_str(args.get(next).copied().unwrap_or(""));
            next += 1;
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
        let after_digits = &tail[digits.len()..];
        match (digits.parse::<usize>(), after_digits.strip_prefix("$s")) {
            (Ok(n), Some(after)) if n > 0 => {
                out.push_str(args.get(n - 1).copied().unwrap_or(""));
                rest = after;
            }
            _ => {
                out.push('%');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
