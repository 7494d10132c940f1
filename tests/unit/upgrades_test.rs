//! Unit tests for the upgrades against the sample site held in memory

use serde_json::json;

use vf_migrate::l10n::Catalog;
use vf_migrate::upgrades::{self, read_only, relationship_helpers, UpgradeContext};
use vf_migrate::{FieldStore, MemoryOptionStore, OptionStore, Runner, SchemaEpoch, SiteSnapshot};

use crate::helpers::load_fixture;

fn sample_context() -> UpgradeContext<SiteSnapshot> {
    let site: SiteSnapshot = serde_json::from_str(&load_fixture("site.json")).unwrap();
    UpgradeContext::new(site, Catalog::new())
}

#[test]
fn fixture_references_skip_non_field_meta() {
    let ctx = sample_context();
    let refs = ctx.fields.field_references().unwrap();
    assert_eq!(refs.len(), 5);
    assert!(refs.iter().all(|r| r.field_key.starts_with("field_")));
    assert!(!refs.iter().any(|r| r.meta_key == "edit_lock"));
}

#[test]
fn relationship_helpers_run_is_idempotent() {
    let mut ctx = sample_context();

    let first = relationship_helpers::run(&mut ctx).unwrap();
    assert_eq!(first.len(), 2);
    assert!(ctx.fields.is_dirty());

    let second = relationship_helpers::run(&mut ctx).unwrap();
    assert!(second.is_empty());
}

#[test]
fn relationship_helpers_leave_scalar_fields_alone() {
    let mut ctx = sample_context();
    relationship_helpers::run(&mut ctx).unwrap();

    assert!(ctx.fields.meta_values(10, "_event_code__p").is_empty());
    assert!(ctx.fields.meta_values(11, "_venue__p").is_empty());
}

#[test]
fn read_only_touches_only_validated_fields() {
    let mut ctx = sample_context();
    let messages = read_only::run(&mut ctx).unwrap();
    assert_eq!(messages.len(), 2);

    let speakers = ctx.fields.field_definition("field_5617a1b2c3d41").unwrap();
    assert_eq!(speakers.setting("read_only"), None);
    assert_eq!(speakers.setting("post_type"), Some(&json!(["speaker"])));
}

#[test]
fn runner_applies_registry_in_order() {
    let registry = upgrades::registry::<SiteSnapshot>(&Catalog::new()).unwrap();
    let mut store = MemoryOptionStore::new();
    store.set_u32("acf_vf_db_version_v4", 1).unwrap();
    let mut runner = Runner::new(registry, Box::new(store), SchemaEpoch::V4).unwrap();
    let mut ctx = sample_context();

    assert_eq!(runner.pending().len(), 1);
    let batch = runner.execute_pending(&mut ctx);
    assert!(batch.is_success());
    assert_eq!(batch.completed[0].id, "upgrade_2");
    assert_eq!(runner.version(), 2);
    assert_eq!(runner.store().get_u32("acf_vf_db_version_v4").unwrap(), Some(2));
    assert!(!runner.has_pending());
}
