//! Database layer for the roster application.
//!
//! Provides the data-access core: SQL generation, PostgreSQL connection
//! management, versioned schema bootstrap, and the table models the command
//! layer consumes.
//!
//! ## Structure
//!
//! - **Query generation**: one fixed statement set per entity table
//! - **Connection**: a lazily-opened session owned by each model
//! - **Model**: an in-memory snapshot with write-through mutations
//! - **Registry**: the declarative description of the managed entities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster::db::connection::{StoreConnection, Value};
//! use roster::db::entities;
//! use roster::db::model::TableModel;
//! use roster::libs::config::Config;
//!
//! let db = Config::read()?.database_or_default();
//! let store = StoreConnection::new(db);
//! let spec = &entities::ST_GROUP;
//! let mut model = TableModel::new(spec.table, &spec.column_names(), store)?;
//! model.refresh();
//! model.add(&[Value::from("Group A"), Value::from("note")])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// PostgreSQL session ownership and statement execution.
pub mod connection;

/// Declarative registry of the managed entities and their fields.
pub mod entities;

/// Database schema migration system.
///
/// Handles versioned schema changes, tracks migration history, and keeps
/// re-runs safe.
pub mod migrations;

/// In-memory table snapshots with write-through CRUD operations.
pub mod model;

/// Parameterized SQL text generation for the entity tables.
pub mod query;
