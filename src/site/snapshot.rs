//! JSON-backed site snapshot.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::types::{Field, FieldDefinition, FieldReference, Post, PostId, PostMeta};
use super::{helper_meta_key, FieldStore};
use crate::files::write_atomic;

/// Posts, postmeta rows and field definitions exported from a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub postmeta: Vec<PostMeta>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(skip)]
    dirty: bool,
}

impl SiteSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site snapshot: {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse site snapshot: {:?}", path))
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize site snapshot")?;
        write_atomic(path, json.as_bytes())?;
        self.dirty = false;
        Ok(())
    }

    /// True when an upgrade changed something since load or the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn meta_values(&self, post_id: PostId, meta_key: &str) -> Vec<&Value> {
        self.postmeta
            .iter()
            .filter(|m| m.post_id == post_id && m.meta_key == meta_key)
            .map(|m| &m.meta_value)
            .collect()
    }

    pub fn field_definition(&self, field_key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == field_key)
    }
}

impl FieldStore for SiteSnapshot {
    fn field_references(&self) -> Result<Vec<FieldReference>> {
        Ok(self
            .postmeta
            .iter()
            .filter_map(|m| {
                let name = m.meta_key.strip_prefix('_')?;
                let field_key = m.meta_value.as_str()?;
                if name.is_empty() || !field_key.starts_with("field_") {
                    return None;
                }
                Some(FieldReference::new(m.post_id, name, field_key))
            })
            .collect())
    }

    fn field_object(&self, reference: &FieldReference) -> Result<Option<Field>> {
        let Some(definition) = self.field_definition(&reference.field_key) else {
            return Ok(None);
        };
        let value = self
            .meta_values(reference.post_id, &reference.meta_key)
            .first()
            .map(|v| (*v).clone());
        Ok(Some(Field {
            definition: definition.clone(),
            meta_key: reference.meta_key.clone(),
            value,
        }))
    }

    fn post_title(&self, post_id: PostId) -> Result<Option<String>> {
        Ok(self
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.title.clone()))
    }

    fn update_field(&mut self, definition: &FieldDefinition) -> Result<()> {
        let existing = self
            .fields
            .iter_mut()
            .find(|f| f.key == definition.key)
            .with_context(|| format!("Field {} does not exist", definition.key))?;
        if existing != definition {
            *existing = definition.clone();
            self.dirty = true;
        }
        Ok(())
    }

    fn update_metadata_helpers(
        &mut self,
        values: &[Value],
        post_id: PostId,
        field: &Field,
    ) -> Result<bool> {
        let helper_key = helper_meta_key(&field.meta_key);

        let mut wanted: Vec<Value> = Vec::with_capacity(values.len());
        for value in values {
            if !wanted.contains(value) {
                wanted.push(value.clone());
            }
        }

        let current: Vec<Value> = self
            .meta_values(post_id, &helper_key)
            .into_iter()
            .cloned()
            .collect();
        if current == wanted {
            return Ok(false);
        }

        self.postmeta
            .retain(|m| !(m.post_id == post_id && m.meta_key == helper_key));
        self.postmeta.extend(
            wanted
                .into_iter()
                .map(|v| PostMeta::new(post_id, helper_key.clone(), v)),
        );
        self.dirty = true;
        Ok(true)
    }
}
