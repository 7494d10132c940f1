//! Site data types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type PostId = u64;

/// Field type handled by the read-only upgrade.
pub const VALIDATED_FIELD_TYPE: &str = "validated_field";

/// A postmeta row pointing at a field definition.
///
/// `meta_key` is the key the value is stored under on the post, without the
/// leading underscore of the reference row. For sub-fields it differs from
/// the definition's name (`team_0_members` vs `members`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    pub post_id: PostId,
    pub meta_key: String,
    pub field_key: String,
}

impl FieldReference {
    pub fn new(post_id: PostId, meta_key: impl Into<String>, field_key: impl Into<String>) -> Self {
        Self {
            post_id,
            meta_key: meta_key.into(),
            field_key: field_key.into(),
        }
    }
}

/// A stored field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Remaining settings, e.g. `read_only` or `sub_field`.
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl FieldDefinition {
    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }

    pub fn set_setting(&mut self, name: &str, value: impl Into<Value>) {
        self.settings.insert(name.to_string(), value.into());
    }
}

/// A field definition loaded through a reference on one post, with the value
/// stored under the reference's meta key attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub definition: FieldDefinition,
    pub meta_key: String,
    pub value: Option<Value>,
}

impl Field {
    pub fn label(&self) -> &str {
        &self.definition.label
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn field_type(&self) -> &str {
        &self.definition.field_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub post_id: PostId,
    pub meta_key: String,
    pub meta_value: Value,
}

impl PostMeta {
    pub fn new(post_id: PostId, meta_key: impl Into<String>, meta_value: impl Into<Value>) -> Self {
        Self {
            post_id,
            meta_key: meta_key.into(),
            meta_value: meta_value.into(),
        }
    }
}
