//! One administrator session: configuration, stores and runner wired together.

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

use crate::admin::settings::{self, AdminRequest, ScriptAsset};
use crate::admin::{AdminAjax, AjaxResponse, ResponseOptions, UpgradeList};
use crate::config::Config;
use crate::epoch::SchemaEpoch;
use crate::l10n::Catalog;
use crate::migrations::{BatchOutcome, MigrationError, PendingSignal, Runner, StepOutcome};
use crate::options::{JsonOptionStore, OptionStore};
use crate::site::SiteFile;
use crate::upgrades::{self, UpgradeContext};

pub type SiteRunner = Runner<UpgradeContext<SiteFile>>;

pub struct Session {
    epoch: SchemaEpoch,
    options: ResponseOptions,
    runner: SiteRunner,
    ctx: UpgradeContext<SiteFile>,
}

impl Session {
    /// Open the option store and site snapshot named by `config` and read the
    /// current database version.
    pub fn open(config: &Config) -> Result<Self> {
        let store = JsonOptionStore::open(config.options_path())?;
        let site = SiteFile::open(config.site_path(), config.site.backup)?;
        Self::with_store(config, Box::new(store), site)
    }

    pub fn with_store(config: &Config, store: Box<dyn OptionStore>, site: SiteFile) -> Result<Self> {
        let epoch = config.host.epoch()?;
        let registry = upgrades::registry(&config.l10n)?;
        let runner = Runner::new(registry, store, epoch)?;
        if let Some(signal) = runner.pending_signal() {
            info!(
                %epoch,
                version = signal.version,
                pending = signal.pending,
                "database upgrades pending"
            );
        }

        Ok(Self {
            epoch,
            options: ResponseOptions {
                charset: config.site.blog_charset.clone(),
                pretty: config.host.debug,
            },
            runner,
            ctx: UpgradeContext::new(site, config.l10n.clone()),
        })
    }

    pub fn epoch(&self) -> SchemaEpoch {
        self.epoch
    }

    pub fn runner(&self) -> &SiteRunner {
        &self.runner
    }

    pub fn site(&self) -> &SiteFile {
        &self.ctx.fields
    }

    pub fn response_options(&self) -> &ResponseOptions {
        &self.options
    }

    pub fn pending_signal(&self) -> Option<PendingSignal> {
        self.runner.pending_signal()
    }

    pub fn upgrade_list(&self) -> UpgradeList {
        UpgradeList::new(self.runner.pending(), &self.ctx.l10n)
    }

    pub fn run(&mut self, identifier: &str) -> std::result::Result<StepOutcome, MigrationError> {
        self.runner.execute(identifier, &mut self.ctx)
    }

    pub fn run_pending(&mut self) -> BatchOutcome {
        self.runner.execute_pending(&mut self.ctx)
    }

    /// Handle one admin AJAX request.
    pub fn dispatch(&mut self, action: &str, params: &HashMap<String, String>) -> AjaxResponse {
        let l10n = self.ctx.l10n.clone();
        let mut ajax = AdminAjax::register(&mut self.runner, &l10n, self.options.clone());
        ajax.dispatch(action, params, &mut self.ctx)
    }

    /// Append the upgrade tab to the options field group, only while
    /// upgrades are pending.
    pub fn options_field_group(&self, group: Value) -> Value {
        if self.runner.has_pending() {
            settings::extend_options_field_group(group, &self.ctx.l10n)
        } else {
            group
        }
    }

    /// Script to enqueue for `request`, if any.
    pub fn script_asset(&self, request: &AdminRequest) -> Option<ScriptAsset> {
        settings::script_asset(request, self.options.pretty, &self.ctx.l10n)
    }

    pub fn l10n(&self) -> &Catalog {
        &self.ctx.l10n
    }
}
