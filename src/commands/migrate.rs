//! Database schema migration command.
//!
//! Applies any schema versions the store has not seen yet. Safe to re-run;
//! an up-to-date store is reported and left untouched.

use crate::db::connection::StoreConnection;
use crate::db::migrations::MigrationManager;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_error;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    if !config.has_database() {
        msg_error!(Message::ConfigNotInitialized);
        return Ok(());
    }

    let mut store = StoreConnection::new(config.database_or_default());
    MigrationManager::new().run_migrations(&mut store)?;
    store.close();
    Ok(())
}
