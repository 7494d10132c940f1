//! upgrade_2: Normalise the `read_only` setting of Validated Fields.
//!
//! Older releases stored the setting as `"true"`/`"false"` or left it empty;
//! it is now always `"yes"` or `"no"`.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;

use super::UpgradeContext;
use crate::l10n;
use crate::site::{FieldStore, VALIDATED_FIELD_TYPE};

pub const IDENTIFIER: &str = "upgrade_2";
pub const POSITION: u32 = 2;
pub const LABEL: &str = "Update Validated Field Read Only values.";

const SETTING: &str = "read_only";

/// The normalised value for a stored `read_only` setting, or `None` when
/// it is already in the current form (or unrecognised).
fn normalise(current: Option<&Value>) -> Option<&'static str> {
    match current {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Some("no"),
        Some(Value::Bool(true)) => Some("yes"),
        Some(Value::String(s)) => match s.as_str() {
            "" | "false" | "0" => Some("no"),
            "true" => Some("yes"),
            _ => None,
        },
        Some(Value::Number(n)) if n.as_u64() == Some(0) => Some("no"),
        _ => None,
    }
}

pub fn run<S: FieldStore>(ctx: &mut UpgradeContext<S>) -> Result<Vec<String>> {
    let mut messages = Vec::new();
    let mut seen = HashSet::new();

    for reference in ctx.fields.field_references()? {
        // Settings live on the definition, so each field only needs one visit.
        if !seen.insert(reference.field_key.clone()) {
            continue;
        }
        let Some(field) = ctx
            .fields
            .field_object(&reference)?
        else {
            continue;
        };
        if field.field_type() != VALIDATED_FIELD_TYPE {
            continue;
        }
        let Some(updated) = normalise(field.definition.setting(SETTING)) else {
            continue;
        };

        let mut definition = field.definition.clone();
        definition.set_setting(SETTING, updated);
        ctx.fields
            .update_field(&definition)
            .with_context(|| format!("Failed to update field {}", definition.key))?;
        messages.push(ctx.l10n.format(l10n::UPDATED_READ_ONLY, &[field.label()]));
    }

    Ok(messages)
}
