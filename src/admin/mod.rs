//! Admin-side surface: AJAX actions, response bodies and settings page hooks.

pub mod ajax;
pub mod response;
pub mod settings;

pub use ajax::{AdminAjax, ResponseOptions, DO_UPGRADE_ACTION, GET_UPGRADES_ACTION, UPGRADE_PARAM};
pub use response::{AjaxResponse, MessageText, UpgradeEntry, UpgradeList, UpgradeResult};
pub use settings::{is_settings_page, AdminRequest};
