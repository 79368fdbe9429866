//! Configuration management for the roster application.
//!
//! Handles the persistent application settings, most importantly the
//! PostgreSQL connection parameters every command needs before it can touch
//! the store. Supports both programmatic access and an interactive setup
//! wizard.
//!
//! ## Storage
//!
//! Settings are stored as pretty-printed JSON in the platform application
//! data directory (see [`DataStorage`]):
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\roster\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/roster/config.json`
//! - **Linux**: `~/.local/share/lacodda/roster/config.json`
//!
//! A missing file is not an error; `Config::read()` falls back to defaults
//! so the application can report a helpful "not configured" state instead
//! of failing at startup.
//!
//! ## Environment overrides
//!
//! Each connection field can be overridden through `ROSTER_DB_HOST`,
//! `ROSTER_DB_PORT`, `ROSTER_DB_NAME`, `ROSTER_DB_USER` and
//! `ROSTER_DB_PASSWORD`, which keeps non-interactive use (CI, scripts,
//! integration tests) away from the config file entirely.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// PostgreSQL connection parameters.
///
/// Exactly the five fields a connection needs. The password is kept in the
/// configuration file as plain text, matching the scope of a workstation
/// tool; anyone needing stricter handling can supply it per-run through
/// `ROSTER_DB_PASSWORD` instead and leave the stored field empty.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "school".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
        }
    }
}

impl DbConfig {
    /// Applies `ROSTER_DB_*` environment overrides on top of the stored
    /// values. An unset variable leaves the stored value alone; an
    /// unparseable port is ignored rather than failing the whole run.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("ROSTER_DB_HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("ROSTER_DB_PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(dbname) = env::var("ROSTER_DB_NAME") {
            self.dbname = dbname;
        }
        if let Ok(user) = env::var("ROSTER_DB_USER") {
            self.user = user;
        }
        if let Ok(password) = env::var("ROSTER_DB_PASSWORD") {
            self.password = password;
        }
        self
    }
}

/// Root configuration object.
///
/// Modules are optional so the file stays minimal: an absent `database`
/// section means the user has not run `roster init` yet, which commands
/// report instead of guessing at credentials.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// PostgreSQL connection settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DbConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read or
    /// parsed; a missing file yields `Config::default()`.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, creating the
    /// application data directory if needed.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Prompts for each connection parameter with the currently stored
    /// value (or the default) pre-filled, so re-running the wizard to fix
    /// one field is cheap. Returns the updated configuration for the
    /// caller to save.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let current = config.database.clone().unwrap_or_default();

        crate::msg_print!(Message::ConfigModuleDatabase);
        let database = DbConfig {
            host: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDbHost.to_string())
                .default(current.host)
                .interact_text()?,
            port: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDbPort.to_string())
                .default(current.port)
                .interact_text()?,
            dbname: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDbName.to_string())
                .default(current.dbname)
                .interact_text()?,
            user: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDbUser.to_string())
                .default(current.user)
                .interact_text()?,
            password: Password::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDbPassword.to_string())
                .allow_empty_password(true)
                .interact()?,
        };
        config.database = Some(database);

        Ok(config)
    }

    /// Connection settings with environment overrides applied, falling
    /// back to defaults when the database module was never configured.
    pub fn database_or_default(&self) -> DbConfig {
        self.database.clone().unwrap_or_default().with_env_overrides()
    }

    /// Whether the database module has been configured (or fully supplied
    /// through the environment).
    pub fn has_database(&self) -> bool {
        self.database.is_some() || env::var("ROSTER_DB_NAME").is_ok()
    }
}
