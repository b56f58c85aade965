// SPDX-License-Identifier: MPL-2.0
//! Application context shared by every front end.
//!
//! `App` wires configuration, localization, the notification service, the
//! request gateway and local storage together, and hands out the feature
//! controllers that operate on them.

pub mod console;
pub mod paths;
pub mod storage;

use crate::cafe::{Admin, Cart};
use crate::config::{self, Config};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{Banner, Manager, Notifier};
use std::fmt;
use storage::Storage;

/// Startup options supplied by the launcher.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `ko`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (for `storage.cbor`).
    /// Takes precedence over `CAFE_CLIENT_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for `settings.toml`).
    /// Takes precedence over `CAFE_CLIENT_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Optional server address, overriding `base_url` from the config file.
    pub base_url: Option<String>,
}

pub struct App {
    pub i18n: I18n,
    config: Config,
    notifier: Notifier,
    gateway: Gateway,
    storage: Storage,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", &self.i18n.current_locale().to_string())
            .field("base_url", &self.gateway.base_url().as_str())
            .field("notifications", &self.notifier.visible_count())
            .finish()
    }
}

impl App {
    /// Loads configuration and storage from the usual locations and builds
    /// the context.
    ///
    /// A missing or unreadable config file falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is unusable.
    pub fn new(flags: Flags) -> Result<Self> {
        paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

        let mut config = config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default configuration");
            Config::default()
        });
        if flags.base_url.is_some() {
            config.base_url = flags.base_url.clone();
        }

        let storage = Storage::open(None);
        Self::with_parts(config, flags.lang, storage)
    }

    /// Builds the context from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is unusable.
    pub fn with_parts(config: Config, lang: Option<String>, storage: Storage) -> Result<Self> {
        let i18n = I18n::new(lang, &config);
        let notifier = Notifier::new(
            Manager::with_capacity(config.max_notifications()),
            config.notification_ttl(),
        );
        let gateway = Gateway::from_config(&config, notifier.clone())?;

        tracing::debug!(
            base_url = %gateway.base_url(),
            locale = %i18n.current_locale(),
            "application context ready"
        );

        Ok(Self {
            i18n,
            config,
            notifier,
            gateway,
            storage,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    #[must_use]
    pub fn cart(&self) -> Cart<'_> {
        Cart::new(&self.gateway)
    }

    #[must_use]
    pub fn admin(&self) -> Admin<'_> {
        Admin::new(&self.gateway)
    }

    /// Renders the visible banners as markup, newest first.
    #[must_use]
    pub fn render_notifications(&self) -> String {
        self.notifier.render(&self.i18n)
    }

    /// Visible banners as terminal lines, oldest first.
    #[must_use]
    pub fn notification_lines(&self) -> Vec<String> {
        self.notifier
            .snapshot()
            .iter()
            .rev()
            .map(|n| Banner::line(n, &self.i18n))
            .collect()
    }
}
