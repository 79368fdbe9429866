//! Display implementation for roster application messages.
//!
//! Converts structured `Message` values into the text shown to the user.
//! Keeping every string here means wording changes never touch command or
//! model code, and each message variant has exactly one phrasing.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigNotInitialized => "Database connection is not configured. Run 'roster init' first.".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::PromptDbHost => "Database host".to_string(),
            Message::PromptDbPort => "Database port".to_string(),
            Message::PromptDbName => "Database name".to_string(),
            Message::PromptDbUser => "Database user".to_string(),
            Message::PromptDbPassword => "Database password".to_string(),
            Message::PromptRunMigrations => "Apply database schema now?".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::SchemaUpToDate => "Database schema is up to date".to_string(),

            // === RECORD MESSAGES ===
            Message::RecordAdded(title) => format!("{} record added successfully.", title),
            Message::RecordAddFailed(title, error) => format!("Failed to add {} record: {}", title.to_lowercase(), error),
            Message::RecordsHeader(title) => format!("{} records:", title),
            Message::NoRecordsFound(title) => format!("No {} records found.", title.to_lowercase()),
            Message::RecordNotFound(title, id) => format!("{} record with ID {} not found.", title, id),
            Message::RecordsToBeDeleted(title) => format!("The following {} records will be deleted:", title.to_lowercase()),
            Message::ConfirmDeleteRecords(count) => format!("Are you sure you want to delete {} record(s)?", count),
            Message::RecordDeleteFailed(title, id, error) => format!("Failed to delete {} record {}: {}", title.to_lowercase(), id, error),
            Message::RecordsDeletedCount(count) => format!("Deleted records: {}", count),
            Message::RecordsDeleteFailedCount(count) => format!("Couldn't delete: {}", count),
            Message::CellUpdated(title, field) => format!("{} {} updated.", title, field.to_lowercase()),
            Message::CellUpdateFailed(field, error) => format!("Failed to update {}: {}", field.to_lowercase(), error),
            Message::IdColumnReadOnly => "The id column is read-only and cannot be edited.".to_string(),
            Message::UnknownField(field, title) => format!("'{}' is not a field of {}.", field, title.to_lowercase()),
            Message::RecordCount(title, count) => format!("{} records in store: {}", title, count),
            Message::SearchResultsHeader(title, pattern) => format!("{} records matching '{}':", title, pattern),
            Message::NoMatchesFound(title, pattern) => format!("No {} records matching '{}'.", title.to_lowercase(), pattern),
            Message::SnapshotStale(title) => format!("Could not refresh {} records; showing last loaded data.", title.to_lowercase()),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };

        write!(f, "{}", text)
    }
}
