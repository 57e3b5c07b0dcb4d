//! Configuration for donelog.
//!
//! Settings live in `config.json` inside the per-user data directory and are
//! written by the `donelog init` wizard. At startup [`Config::load`] reads the
//! file and lets environment variables (also read from a `.env` file) take
//! precedence:
//!
//! | Variable                | Overrides             |
//! |-------------------------|-----------------------|
//! | `TODOIST_API_TOKEN`     | `todoist.api_token`   |
//! | `DONELOG_API_URL`       | `todoist.api_url`     |
//! | `DONELOG_SYNC_INTERVAL` | `sync.interval_secs`  |
//! | `DONELOG_DB`            | `sync.db_path`        |
//!
//! ```rust,no_run
//! use donelog::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("syncing every {:?}", config.sync_interval());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::todoist::TodoistConfig;
use crate::db::store::Store;
use crate::libs::error::StorageError;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 300;

pub const ENV_API_TOKEN: &str = "TODOIST_API_TOKEN";
pub const ENV_API_URL: &str = "DONELOG_API_URL";
pub const ENV_SYNC_INTERVAL: &str = "DONELOG_SYNC_INTERVAL";
pub const ENV_DB_PATH: &str = "DONELOG_DB";

/// A selectable section of the `init` wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Seconds between two sync cycles of `donelog watch`.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Database file; the data directory is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

fn default_interval_secs() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            db_path: None,
        }
    }
}

impl SyncConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "sync".to_string(),
            name: "Sync".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleSync);
        Ok(Self {
            interval_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSyncInterval.to_string())
                .default(default.interval_secs)
                .validate_with(|secs: &u64| match *secs > 0 {
                    true => Ok(()),
                    false => Err("interval must be at least one second"),
                })
                .interact_text()?,
            db_path: default.db_path,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todoist: Option<TodoistConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncConfig>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Reads the config file, or returns defaults when there is none.
    pub fn read() -> Result<Config> {
        Self::read_from(Self::path()?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path()?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the config file. Returns `false` when there was nothing to remove.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Config file merged with environment overrides.
    pub fn load() -> Result<Config> {
        Self::read()?.apply_env(|name| env::var(name).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let value = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(token) = value(ENV_API_TOKEN) {
            self.todoist.get_or_insert_with(|| TodoistConfig::with_token("")).api_token = token;
        }
        if let Some(url) = value(ENV_API_URL) {
            self.todoist.get_or_insert_with(|| TodoistConfig::with_token("")).api_url = url;
        }
        if let Some(raw) = value(ENV_SYNC_INTERVAL) {
            let secs = match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => msg_bail_anyhow!(Message::InvalidEnvValue(ENV_SYNC_INTERVAL.to_string(), raw)),
            };
            self.sync.get_or_insert_with(SyncConfig::default).interval_secs = secs;
        }
        if let Some(path) = value(ENV_DB_PATH) {
            self.sync.get_or_insert_with(SyncConfig::default).db_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    /// The Todoist settings, provided a token is configured.
    pub fn todoist(&self) -> Result<TodoistConfig> {
        match &self.todoist {
            Some(todoist) if !todoist.api_token.trim().is_empty() => Ok(todoist.clone()),
            _ => msg_bail_anyhow!(Message::TodoistTokenMissing),
        }
    }

    pub fn sync_interval(&self) -> Duration {
        let secs = self.sync.as_ref().map_or(DEFAULT_SYNC_INTERVAL_SECS, |sync| sync.interval_secs);
        Duration::from_secs(secs.max(1))
    }

    /// Opens the store at the configured path, or in the data directory.
    pub fn open_store(&self) -> Result<Store, StorageError> {
        match self.sync.as_ref().and_then(|sync| sync.db_path.as_ref()) {
            Some(path) => Store::open(path),
            None => Store::new(),
        }
    }

    /// Interactive setup wizard, seeded with the current file contents.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [TodoistConfig::module(), SyncConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "todoist" => config.todoist = Some(TodoistConfig::init(&config.todoist)?),
                "sync" => config.sync = Some(SyncConfig::init(&config.sync)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
