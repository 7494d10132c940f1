//! Validated Field settings page integration.

use serde::Serialize;
use serde_json::{json, Value};

use crate::l10n::{self, Catalog};

pub const SETTINGS_PAGES: [&str; 2] = ["validated-field-settings", "acf-validated-field"];
pub const FIELD_GROUP_POST_TYPES: [&str; 2] = ["acf-field-group", "acf"];

/// Element the admin script renders the upgrade list into.
pub const UPGRADES_CONTAINER: &str = r#"<div id="acf-vf-db-upgrades"></div>"#;

/// The parts of an admin request that decide which screen is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminRequest {
    /// Script name, e.g. `admin.php` or `edit.php`.
    pub pagenow: String,
    pub page: Option<String>,
    pub post_type: Option<String>,
}

impl AdminRequest {
    pub fn new(pagenow: &str) -> Self {
        Self {
            pagenow: pagenow.to_string(),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: &str) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn post_type(mut self, post_type: &str) -> Self {
        self.post_type = Some(post_type.to_string());
        self
    }
}

fn one_of(value: Option<&String>, allowed: &[&str]) -> bool {
    value.map(|v| allowed.contains(&v.as_str())).unwrap_or(false)
}

/// True on the Validated Field settings screen, either as a top-level admin
/// page or nested under the field group list.
pub fn is_settings_page(request: &AdminRequest) -> bool {
    let on_page = one_of(request.page.as_ref(), &SETTINGS_PAGES);
    match request.pagenow.as_str() {
        "admin.php" => on_page,
        "edit.php" => on_page && one_of(request.post_type.as_ref(), &FIELD_GROUP_POST_TYPES),
        _ => false,
    }
}

/// The "Database Updates!" tab appended to the options field group while
/// upgrades are pending. It stores no values.
pub fn upgrade_tab_fields(l10n: &Catalog) -> Vec<Value> {
    vec![
        json!({
            "key": "field_5617ec772774e",
            "label": l10n.translate(l10n::TAB_LABEL),
            "name": "",
            "type": "tab",
            "instructions": "",
            "required": 0,
            "conditional_logic": 0,
            "wrapper": {"width": "", "class": "justin", "id": ""},
            "placement": "top",
            "endpoint": 0
        }),
        json!({
            "key": "field_5617ec942774f",
            "label": l10n.translate(l10n::TAB_MESSAGE_LABEL),
            "name": "",
            "type": "message",
            "instructions": "",
            "required": 0,
            "conditional_logic": 0,
            "wrapper": {"width": "", "class": "", "id": ""},
            "message": UPGRADES_CONTAINER,
            "new_lines": "wpautop",
            "esc_html": 0
        }),
    ]
}

/// Append the upgrade tab to an options field group's `fields` array.
///
/// Returns the group untouched when it has no `fields` array.
pub fn extend_options_field_group(mut group: Value, l10n: &Catalog) -> Value {
    if let Some(fields) = group.get_mut("fields").and_then(Value::as_array_mut) {
        fields.extend(upgrade_tab_fields(l10n));
    }
    group
}

/// Script the settings page loads to drive the upgrades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAsset {
    pub handle: &'static str,
    pub src: String,
    pub object_name: &'static str,
    pub upgrade_complete: String,
}

/// The asset for the current screen, if it needs one. Debug builds load the
/// unminified script.
pub fn script_asset(request: &AdminRequest, debug: bool, l10n: &Catalog) -> Option<ScriptAsset> {
    if !is_settings_page(request) {
        return None;
    }
    let min = if debug { "" } else { ".min" };
    Some(ScriptAsset {
        handle: "acf-validated-db-updates",
        src: format!("common/js/db-updates{}.js", min),
        object_name: "vf_upgrade_l10n",
        upgrade_complete: l10n.translate(l10n::UPGRADE_COMPLETE),
    })
}
