//! The two admin AJAX actions.
//!
//! Actions are only registered while the runner has pending upgrades; once
//! everything is applied the admin screen has nothing to call.

use std::collections::HashMap;

use tracing::debug;

use super::response::{AjaxResponse, UpgradeList, UpgradeResult};
use crate::l10n::{self, Catalog};
use crate::migrations::{MigrationError, Runner};

pub const GET_UPGRADES_ACTION: &str = "acf_vf_get_upgrades";
pub const DO_UPGRADE_ACTION: &str = "acf_vf_do_upgrade";

/// Request parameter naming the upgrade to run.
pub const UPGRADE_PARAM: &str = "upgrade";

/// Encoding options for responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOptions {
    pub charset: String,
    pub pretty: bool,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            charset: "UTF-8".to_string(),
            pretty: false,
        }
    }
}

pub struct AdminAjax<'r, C> {
    runner: &'r mut Runner<C>,
    l10n: &'r Catalog,
    options: ResponseOptions,
    actions: Vec<&'static str>,
}

impl<'r, C> AdminAjax<'r, C> {
    pub fn register(runner: &'r mut Runner<C>, l10n: &'r Catalog, options: ResponseOptions) -> Self {
        let actions = if runner.has_pending() {
            vec![GET_UPGRADES_ACTION, DO_UPGRADE_ACTION]
        } else {
            Vec::new()
        };
        debug!(?actions, "registered admin actions");
        Self {
            runner,
            l10n,
            options,
            actions,
        }
    }

    pub fn is_registered(&self, action: &str) -> bool {
        self.actions.iter().any(|a| *a == action)
    }

    pub fn actions(&self) -> &[&'static str] {
        &self.actions
    }

    /// Route one request. Unregistered actions get the host's `0` / 400.
    pub fn dispatch(
        &mut self,
        action: &str,
        params: &HashMap<String, String>,
        ctx: &mut C,
    ) -> AjaxResponse {
        if !self.is_registered(action) {
            return AjaxResponse::text(400, "0", &self.options.charset);
        }
        match action {
            GET_UPGRADES_ACTION => self.get_upgrades(),
            DO_UPGRADE_ACTION => {
                let upgrade = params.get(UPGRADE_PARAM).map(String::as_str).unwrap_or("");
                self.do_upgrade(upgrade, ctx)
            }
            _ => AjaxResponse::text(400, "0", &self.options.charset),
        }
    }

    pub fn get_upgrades(&self) -> AjaxResponse {
        let list = UpgradeList::new(self.runner.pending(), self.l10n);
        AjaxResponse::json(&list, &self.options.charset, self.options.pretty)
    }

    pub fn do_upgrade(&mut self, upgrade: &str, ctx: &mut C) -> AjaxResponse {
        match self.runner.execute(upgrade, ctx) {
            Ok(outcome) => {
                let body = vec![UpgradeResult::new(outcome, self.l10n)];
                AjaxResponse::json(&body, &self.options.charset, self.options.pretty)
            }
            Err(MigrationError::UnknownStep { identifier }) => AjaxResponse::text(
                500,
                self.l10n.format(l10n::UPGRADE_ERROR, &[identifier.as_str()]),
                &self.options.charset,
            ),
            Err(e) => AjaxResponse::text(500, e.to_string(), &self.options.charset),
        }
    }
}
