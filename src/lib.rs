//! # Roster - school records from the terminal
//!
//! A command-line manager for school records kept in PostgreSQL: teachers,
//! students and study groups with table views, inline cell edits and
//! interactive record entry.
//!
//! ## Features
//!
//! - **Record Management**: Add, list, edit and delete entity records
//! - **Inline Edits**: Change a single field of a record by id
//! - **Search**: Case-insensitive substring search over any field
//! - **Schema Bootstrap**: Versioned migrations create and evolve tables
//! - **Interactive Setup**: Guided configuration of the store connection
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
