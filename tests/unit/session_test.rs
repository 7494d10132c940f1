//! Unit tests for the session wiring against a site snapshot on disk

use std::collections::HashMap;

use serde_json::{json, Value};

use vf_migrate::admin::{AdminRequest, UpgradeList, UpgradeResult};
use vf_migrate::files::backup::{backup_path_for, has_backup};
use vf_migrate::{MigrationError, Session, SiteSnapshot};

use crate::helpers::{set_stored_version, stored_version, temp_site_config};

const V5_KEY: &str = "acf_vf_db_version_v5";
const V4_KEY: &str = "acf_vf_db_version_v4";

fn params(upgrade: &str) -> HashMap<String, String> {
    HashMap::from([("upgrade".to_string(), upgrade.to_string())])
}

#[test]
fn fresh_install_lists_every_upgrade() {
    let (_temp, config) = temp_site_config();
    let session = Session::open(&config).unwrap();

    let list = session.upgrade_list();
    let ids: Vec<_> = list.upgrades.iter().map(|u| u.upgrade.as_str()).collect();
    assert_eq!(ids, vec!["upgrade_1", "upgrade_2"]);
    assert_eq!(session.runner().version(), 0);

    let signal = session.pending_signal().unwrap();
    assert_eq!(signal.pending, 2);
    assert_eq!(signal.version, 0);
}

#[test]
fn partially_upgraded_install_lists_remaining() {
    let (_temp, config) = temp_site_config();
    set_stored_version(&config, V5_KEY, 1);

    let session = Session::open(&config).unwrap();
    let ids: Vec<_> = session
        .upgrade_list()
        .upgrades
        .into_iter()
        .map(|u| u.upgrade)
        .collect();
    assert_eq!(ids, vec!["upgrade_2".to_string()]);
}

#[test]
fn up_to_date_install_has_nothing_to_update() {
    let (_temp, config) = temp_site_config();
    set_stored_version(&config, V5_KEY, 2);

    let session = Session::open(&config).unwrap();
    let list = session.upgrade_list();
    assert!(list.upgrades.is_empty());
    assert_eq!(list.message, "Nothing to update!");
    assert!(session.pending_signal().is_none());
}

#[test]
fn running_upgrade_persists_version_and_data() {
    let (_temp, config) = temp_site_config();

    {
        let mut session = Session::open(&config).unwrap();
        let outcome = session.run("upgrade_1").unwrap();
        assert_eq!(outcome.id, "upgrade_1");
        assert_eq!(
            outcome.messages,
            vec![
                "Updated values for field Speakers, post Spring Conference.".to_string(),
                "Updated values for field Speakers, post Autumn Workshop.".to_string(),
            ]
        );
        assert_eq!(session.runner().version(), 1);
    }

    assert_eq!(stored_version(&config, V5_KEY), Some(1));
    let site = SiteSnapshot::load(&config.site_path()).unwrap();
    assert_eq!(site.meta_values(10, "_speakers__p"), vec![&json!(21), &json!(22)]);
    assert_eq!(site.meta_values(11, "_speakers__p"), vec![&json!(22)]);

    let reopened = Session::open(&config).unwrap();
    assert_eq!(reopened.runner().version(), 1);
}

#[test]
fn rerunning_upgrade_reports_nothing() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();

    session.run("upgrade_2").unwrap();
    let again = session.run("upgrade_2").unwrap();
    assert!(again.messages.is_empty());

    let wrapped = UpgradeResult::new(again, session.l10n());
    assert_eq!(wrapped.messages[0].text, "Nothing to update!");
}

#[test]
fn read_only_upgrade_normalises_settings() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();

    let outcome = session.run("upgrade_2").unwrap();
    assert_eq!(
        outcome.messages,
        vec![
            "Updated read-only settings for field Event Code.".to_string(),
            "Updated read-only settings for field Venue.".to_string(),
        ]
    );

    let site = SiteSnapshot::load(&config.site_path()).unwrap();
    let setting = |key: &str| site.field_definition(key).unwrap().setting("read_only").cloned();
    assert_eq!(setting("field_5617a1b2c3d42"), Some(json!("yes")));
    assert_eq!(setting("field_5617a1b2c3d43"), Some(json!("no")));
    assert_eq!(
        site.field_definition("field_5617a1b2c3d42").unwrap().setting("unique"),
        Some(&json!("global"))
    );
}

#[test]
fn unknown_upgrade_leaves_version_untouched() {
    let (_temp, config) = temp_site_config();
    set_stored_version(&config, V5_KEY, 1);
    let mut session = Session::open(&config).unwrap();

    let err = session.run("upgrade_99").unwrap_err();
    assert!(matches!(err, MigrationError::UnknownStep { .. }));
    assert_eq!(err.to_string(), "Error performing upgrade upgrade_99!");
    assert_eq!(session.runner().version(), 1);
    assert_eq!(stored_version(&config, V5_KEY), Some(1));
}

#[test]
fn missing_site_fails_upgrade_without_advancing() {
    let (temp, mut config) = temp_site_config();
    config.site.data_path = temp
        .path()
        .join("absent.json")
        .to_string_lossy()
        .into_owned();
    let mut session = Session::open(&config).unwrap();
    assert!(!session.site().exists());

    let err = session.run("upgrade_1").unwrap_err();
    assert!(matches!(err, MigrationError::Action { .. }));
    assert!(err.to_string().contains("Site snapshot not found"));
    assert_eq!(stored_version(&config, V5_KEY), None);
}

#[test]
fn run_pending_applies_all_then_is_idempotent() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();

    let batch = session.run_pending();
    assert!(batch.is_success());
    let ids: Vec<_> = batch.completed.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["upgrade_1", "upgrade_2"]);
    assert_eq!(stored_version(&config, V5_KEY), Some(2));

    let second = session.run_pending();
    assert!(second.is_success());
    assert!(second.completed.is_empty());
}

#[test]
fn epochs_keep_separate_versions() {
    let (_temp, mut config) = temp_site_config();
    set_stored_version(&config, V5_KEY, 2);

    config.host.acf_version = "4.4.12".to_string();
    let mut session = Session::open(&config).unwrap();
    assert_eq!(session.runner().version_key(), V4_KEY);
    assert_eq!(session.upgrade_list().upgrades.len(), 2);

    session.run("upgrade_1").unwrap();
    assert_eq!(stored_version(&config, V4_KEY), Some(1));
    assert_eq!(stored_version(&config, V5_KEY), Some(2));
}

#[test]
fn site_is_backed_up_once_before_first_change() {
    let (_temp, config) = temp_site_config();
    let path = config.site_path();
    let original = std::fs::read_to_string(&path).unwrap();

    let mut session = Session::open(&config).unwrap();
    session.run_pending();

    assert!(has_backup(&path));
    assert_eq!(std::fs::read_to_string(backup_path_for(&path)).unwrap(), original);
}

#[test]
fn no_backup_when_disabled() {
    let (_temp, mut config) = temp_site_config();
    config.site.backup = false;

    let mut session = Session::open(&config).unwrap();
    session.run("upgrade_1").unwrap();

    assert!(!has_backup(&config.site_path()));
}

#[test]
fn dispatch_get_upgrades_returns_list() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();

    let response = session.dispatch("acf_vf_get_upgrades", &HashMap::new());
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "application/json; charset=UTF-8");

    let list: UpgradeList = serde_json::from_str(&response.body).unwrap();
    assert_eq!(list.upgrades.len(), 2);
    assert_eq!(list.action, "Upgrade");
}

#[test]
fn dispatch_do_upgrade_wraps_messages() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();

    let response = session.dispatch("acf_vf_do_upgrade", &params("upgrade_2"));
    assert_eq!(response.status, 200);

    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body[0]["id"], "upgrade_2");
    assert_eq!(
        body[0]["messages"][0]["text"],
        "Updated read-only settings for field Event Code."
    );
    assert_eq!(session.runner().version(), 2);
}

#[test]
fn dispatch_unknown_upgrade_is_server_error() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();

    let response = session.dispatch("acf_vf_do_upgrade", &params("upgrade_7"));
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "Error performing upgrade upgrade_7!");
    assert_eq!(session.runner().version(), 0);
}

#[test]
fn actions_unregistered_when_up_to_date() {
    let (_temp, config) = temp_site_config();
    set_stored_version(&config, V5_KEY, 2);
    let mut session = Session::open(&config).unwrap();

    let response = session.dispatch("acf_vf_get_upgrades", &HashMap::new());
    assert_eq!(response.status, 400);
    assert_eq!(response.body, "0");
}

#[test]
fn translated_labels_and_messages() {
    let (_temp, mut config) = temp_site_config();
    config.l10n = config
        .l10n
        .clone()
        .with(
            "Updated read-only settings for field %1$s.",
            "Schreibschutz für Feld %1$s aktualisiert.",
        )
        .with("Upgrade", "Aktualisieren");
    let mut session = Session::open(&config).unwrap();

    assert_eq!(session.upgrade_list().action, "Aktualisieren");
    let outcome = session.run("upgrade_2").unwrap();
    assert_eq!(outcome.messages[1], "Schreibschutz für Feld Venue aktualisiert.");
}

#[test]
fn options_group_gets_tab_only_while_pending() {
    let (_temp, config) = temp_site_config();
    let mut session = Session::open(&config).unwrap();
    let group = json!({"key": "group_vf_options", "fields": [{"key": "field_a"}]});

    let extended = session.options_field_group(group.clone());
    let fields = extended["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[1]["type"], "tab");
    assert_eq!(fields[1]["label"], "Database Updates!");

    session.run_pending();
    assert_eq!(session.options_field_group(group.clone()), group);
}

#[test]
fn script_asset_on_settings_page_only() {
    let (_temp, mut config) = temp_site_config();
    config.host.debug = true;
    let session = Session::open(&config).unwrap();

    let request = AdminRequest::new("edit.php")
        .page("validated-field-settings")
        .post_type("acf-field-group");
    let asset = session.script_asset(&request).unwrap();
    assert_eq!(asset.src, "common/js/db-updates.js");
    assert_eq!(
        asset.upgrade_complete,
        "Database upgrades completed! Your browser will now refresh."
    );

    assert!(session
        .script_asset(&AdminRequest::new("edit.php").page("validated-field-settings"))
        .is_none());
}
