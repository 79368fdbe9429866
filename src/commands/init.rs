//! Application configuration initialization command.
//!
//! Interactive setup wizard for first-time use: collects the database
//! connection parameters and offers to apply the schema right away, so a
//! fresh install is one command away from a working store.

use crate::db::connection::StoreConnection;
use crate::db::migrations::MigrationManager;
use crate::libs::config::{Config, CONFIG_FILE_NAME};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        return Ok(());
    }

    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);

    // A configured connection with no tables is not usable yet; offer the
    // schema bootstrap in the same sitting.
    let apply = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptRunMigrations.to_string())
        .default(true)
        .interact()?;
    if apply {
        let mut store = StoreConnection::new(config.database_or_default());
        MigrationManager::new().run_migrations(&mut store)?;
        store.close();
    }

    Ok(())
}
