//! Configuration management for the worklog service.
//!
//! Settings live in a JSON file inside the platform application-data
//! directory and can be created or updated through an interactive wizard.
//! The server port can additionally be overridden through the `PORT`
//! environment variable so deployments keep their usual contract.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\worklog\config.json`
//! - **macOS**: `~/Library/Application Support/worklog/config.json`
//! - **Linux**: `~/.local/share/worklog/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worklog::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! println!("listening on port {}", config.port);
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};

use crate::db::db::DB_FILE_NAME;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// HTTP listen port for the REST API.
    pub port: u16,

    /// SQLite database file name, resolved inside the data directory.
    pub db_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            db_file: DB_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration file, falling back to defaults when absent.
    ///
    /// A `PORT` environment variable always wins over the configured port.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let mut config = if config_file_path.exists() {
            let config_str = fs::read_to_string(config_file_path)?;
            serde_json::from_str(&config_str)?
        } else {
            Config::default()
        };

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse().context("PORT must be a number")?;
        }

        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive setup wizard, pre-filling current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        let port: u16 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerPort.to_string())
            .default(current.port)
            .interact_text()?;

        let db_file: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabaseFile.to_string())
            .default(current.db_file)
            .interact_text()?;

        Ok(Config { port, db_file })
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Absolute path of the configured database file.
    pub fn db_path(&self) -> Result<PathBuf> {
        DataStorage::new().get_path(&self.db_file)
    }
}
