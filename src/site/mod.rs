//! Access to the custom-field data the upgrades fix up.
//!
//! `FieldStore` is the seam to the host's field persistence. `SiteSnapshot`
//! implements it over a JSON export of posts, postmeta and field definitions;
//! `SiteFile` binds a snapshot to its file and writes every change through.

mod file;
mod snapshot;
mod types;

pub use file::SiteFile;
pub use snapshot::SiteSnapshot;
pub use types::*;

use anyhow::Result;
use serde_json::Value;

/// Suffix of the meta key holding relationship helper entries.
pub const HELPER_SUFFIX: &str = "__p";

/// Helper meta key for a relationship field name.
pub fn helper_meta_key(field_name: &str) -> String {
    format!("_{}{}", field_name, HELPER_SUFFIX)
}

pub trait FieldStore {
    /// Postmeta rows whose key starts with `_` and whose value names a field.
    fn field_references(&self) -> Result<Vec<FieldReference>>;

    /// Definition named by `reference`, with the value the reference points at.
    fn field_object(&self, reference: &FieldReference) -> Result<Option<Field>>;

    fn post_title(&self, post_id: PostId) -> Result<Option<String>>;

    /// Persist a changed field definition.
    fn update_field(&mut self, definition: &FieldDefinition) -> Result<()>;

    /// Rewrite the relationship helper entries for `field` on `post_id` so
    /// there is exactly one per related value. The helper key derives from
    /// the field's meta key. Returns whether anything changed.
    fn update_metadata_helpers(
        &mut self,
        values: &[Value],
        post_id: PostId,
        field: &Field,
    ) -> Result<bool>;
}
