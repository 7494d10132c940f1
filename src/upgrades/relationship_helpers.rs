//! upgrade_1: Generate helper meta fields for relationship uniqueness queries.
//!
//! For every field reference whose stored value is an array, rewrite the
//! `_{name}__p` helper rows so there is one per related value.

use anyhow::{Context, Result};
use serde_json::Value;

use super::UpgradeContext;
use crate::l10n;
use crate::site::FieldStore;

pub const IDENTIFIER: &str = "upgrade_1";
pub const POSITION: u32 = 1;
pub const LABEL: &str =
    "Relationship Fields: Generate helper meta fields for uniqueness queries.";

pub fn run<S: FieldStore>(ctx: &mut UpgradeContext<S>) -> Result<Vec<String>> {
    let mut messages = Vec::new();

    for reference in ctx.fields.field_references()? {
        let Some(field) = ctx
            .fields
            .field_object(&reference)?
        else {
            continue;
        };
        let Some(Value::Array(values)) = field.value.as_ref() else {
            continue;
        };

        let changed = ctx
            .fields
            .update_metadata_helpers(values, reference.post_id, &field)
            .with_context(|| {
                format!(
                    "Failed to update helpers for field {} on post {}",
                    field.definition.key, reference.post_id
                )
            })?;
        if !changed {
            continue;
        }

        let title = ctx
            .fields
            .post_title(reference.post_id)?
            .unwrap_or_else(|| format!("#{}", reference.post_id));
        messages.push(
            ctx.l10n
                .format(l10n::UPDATED_RELATIONSHIP_VALUES, &[field.label(), title.as_str()]),
        );
    }

    Ok(messages)
}
