//! Versioned schema bootstrap for the entity tables.
//!
//! Keeps a `migrations` bookkeeping table recording every applied version,
//! applies pending versions in order inside one transaction, and is safe to
//! re-run at any time. Invoked from `roster migrate` and as part of
//! `roster init`.

use crate::db::connection::StoreConnection;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use postgres::Transaction;

/// Bookkeeping table tracking which schema versions have been applied.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id SERIAL PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Clone)]
struct Migration {
    version: i32,
    name: &'static str,
    up: fn(&mut Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers the schema history in version order.
    fn register_migrations(&mut self) {
        // Version 1: the three entity tables. Each has a store-assigned
        // serial id followed by its data columns.
        self.add_migration(1, "create_entity_tables", |tx| {
            tx.batch_execute(
                "CREATE TABLE IF NOT EXISTS \"Teacher\" (
                    id SERIAL PRIMARY KEY,
                    f_fio TEXT NOT NULL,
                    f_phone TEXT,
                    f_email TEXT,
                    f_comment TEXT
                )",
            )?;
            tx.batch_execute(
                "CREATE TABLE IF NOT EXISTS \"Student\" (
                    id SERIAL PRIMARY KEY,
                    f_fio TEXT NOT NULL,
                    f_email TEXT,
                    f_comment TEXT
                )",
            )?;
            tx.batch_execute(
                "CREATE TABLE IF NOT EXISTS \"StGroup\" (
                    id SERIAL PRIMARY KEY,
                    f_title TEXT NOT NULL,
                    f_comment TEXT
                )",
            )?;
            Ok(())
        });

        // Version 2: name indices backing the case-insensitive search.
        self.add_migration(2, "index_names_for_search", |tx| {
            tx.batch_execute("CREATE INDEX IF NOT EXISTS idx_teacher_fio ON \"Teacher\" (f_fio)")?;
            tx.batch_execute("CREATE INDEX IF NOT EXISTS idx_student_fio ON \"Student\" (f_fio)")?;
            tx.batch_execute("CREATE INDEX IF NOT EXISTS idx_stgroup_title ON \"StGroup\" (f_title)")?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: i32, name: &'static str, up: fn(&mut Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every pending migration in version order.
    ///
    /// All pending versions run inside a single transaction: either the
    /// schema reaches the newest version or it stays where it was.
    pub fn run_migrations(&self, store: &mut StoreConnection) -> Result<()> {
        let client = store.connect()?;
        client.batch_execute(MIGRATIONS_TABLE)?;

        let row = client.query_one("SELECT COALESCE(MAX(version), 0) FROM migrations", &[])?;
        let current_version: i32 = row.try_get(0).unwrap_or(0);

        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();
        if pending.is_empty() {
            msg_debug!(Message::SchemaUpToDate);
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let mut tx = client.transaction()?;
        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&mut tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES ($1, $2)",
                        &[&migration.version, &migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }
        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest version this binary knows about.
    pub fn latest_version(&self) -> i32 {
        self.migrations.iter().map(|m| m.version).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_registered_in_ascending_order() {
        let manager = MigrationManager::new();
        let versions: Vec<i32> = manager.migrations.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
        assert_eq!(manager.latest_version(), *versions.last().unwrap());
    }
}
