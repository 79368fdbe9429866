/// Every user-facing message the application can emit.
///
/// Variants carry the dynamic parts of the text; the wording itself lives
/// in the `Display` implementation so all phrasing stays in one place.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigNotInitialized,
    ConfigModuleDatabase,
    PromptDbHost,
    PromptDbPort,
    PromptDbName,
    PromptDbUser,
    PromptDbPassword,
    PromptRunMigrations,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(i32, String),
    MigrationCompleted(i32),
    MigrationFailed(i32, String),
    AllMigrationsCompleted,
    SchemaUpToDate,

    // === RECORD MESSAGES ===
    RecordAdded(String),
    RecordAddFailed(String, String),
    RecordsHeader(String),
    NoRecordsFound(String),
    RecordNotFound(String, i64),
    RecordsToBeDeleted(String),
    ConfirmDeleteRecords(usize),
    RecordDeleteFailed(String, i64, String),
    RecordsDeletedCount(usize),
    RecordsDeleteFailedCount(usize),
    CellUpdated(String, String),        // entity title, field label
    CellUpdateFailed(String, String),   // field label, error
    IdColumnReadOnly,
    UnknownField(String, String), // field, entity title
    RecordCount(String, i64),
    SearchResultsHeader(String, String), // entity title, pattern
    NoMatchesFound(String, String),
    SnapshotStale(String),

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
