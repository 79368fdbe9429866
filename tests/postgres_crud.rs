//! CRUD round-trips against a live PostgreSQL instance.
//!
//! These tests need a reachable server and are gated behind the
//! `postgres-tests` feature:
//!
//! ```text
//! ROSTER_DB_NAME=roster_test cargo test --features postgres-tests
//! ```
//!
//! Connection parameters come from the `ROSTER_DB_*` environment variables,
//! falling back to the stock local defaults. The suite owns the entity
//! tables in that database: it applies the schema and deletes rows freely.

#![cfg(feature = "postgres-tests")]

use roster::db::connection::{StoreConnection, Value};
use roster::db::entities::EntitySpec;
use roster::db::migrations::MigrationManager;
use roster::db::model::TableModel;
use roster::db::{entities, query};
use roster::libs::config::DbConfig;
use std::sync::Mutex;

/// Serializes all tests in this binary: they share one database and the
/// migration bookkeeping must not run concurrently.
static DB_LOCK: Mutex<()> = Mutex::new(());

fn test_config() -> DbConfig {
    DbConfig::default().with_env_overrides()
}

/// Applies the schema and clears the entity table, returning a model ready
/// for the test body.
fn fresh_model(spec: &EntitySpec) -> TableModel {
    let mut store = StoreConnection::new(test_config());
    MigrationManager::new().run_migrations(&mut store).unwrap();

    let clear = query::GeneratedQuery {
        text: format!("DELETE FROM \"{}\"", spec.table),
        params: 0,
        kind: query::QueryKind::Write,
    };
    store.execute(&clear, &[]).unwrap();

    TableModel::new(spec.table, &spec.column_names(), store).unwrap()
}

#[test]
fn test_add_then_refresh_round_trip() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut model = fresh_model(&entities::ST_GROUP);

    model.add(&[Value::from("Group A"), Value::from("note")]).unwrap();

    assert_eq!(model.row_count(), 1);
    assert_eq!(model.column_names(), ["id", "f_title", "f_comment"]);
    let id = model.record_id(0).unwrap();
    assert!(id > 0);
    assert_eq!(model.cell(0, 1), Some(&Value::from("Group A")));
    assert_eq!(model.cell(0, 2), Some(&Value::from("note")));

    // A second insert gets a fresh id.
    model.add(&[Value::from("Group B"), Value::Null]).unwrap();
    assert_eq!(model.row_count(), 2);
    let second = model.record_id(1).unwrap();
    assert_ne!(id, second);
    assert_eq!(model.cell(1, 2), Some(&Value::Null));
}

#[test]
fn test_delete_of_absent_id_is_a_zero_row_delete() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut model = fresh_model(&entities::TEACHER);

    model
        .add(&[Value::from("Maria Ivanova"), Value::from("555-0101"), Value::from("mi@school.edu"), Value::Null])
        .unwrap();
    assert_eq!(model.row_count(), 1);

    // No row has this id; the delete executes without error and the
    // snapshot is unchanged apart from what refresh reflects.
    model.delete_record(9_999_999).unwrap();
    assert_eq!(model.row_count(), 1);

    let id = model.record_id(0).unwrap();
    model.delete_record(id).unwrap();
    assert_eq!(model.row_count(), 0);
    assert_eq!(model.count_in_store().unwrap(), 0);
}

#[test]
fn test_set_cell_writes_through_without_format_validation() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut model = fresh_model(&entities::STUDENT);

    model
        .add(&[Value::from("Pyotr Sidorov"), Value::from("ps@school.edu"), Value::from("transfer")])
        .unwrap();
    let email_col = 2; // id, f_fio, f_email, f_comment

    // The core performs no format validation; that policy lives in the
    // command layer. Whatever scalar arrives is written through.
    model.set_cell(0, email_col, Value::from("bad-email")).unwrap();
    assert_eq!(model.cell(0, email_col), Some(&Value::from("bad-email")));

    // The store agrees after a full reload.
    assert!(model.refresh());
    assert_eq!(model.cell(0, email_col), Some(&Value::from("bad-email")));

    // Editing one cell left the neighbors alone.
    assert_eq!(model.cell(0, 1), Some(&Value::from("Pyotr Sidorov")));
    assert_eq!(model.cell(0, 3), Some(&Value::from("transfer")));
}

#[test]
fn test_search_and_record_lookup() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut model = fresh_model(&entities::ST_GROUP);

    model.add(&[Value::from("Algebra Circle"), Value::Null]).unwrap();
    model.add(&[Value::from("Chess Club"), Value::Null]).unwrap();

    let hits = model.search("f_title", "%chess%").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get("f_title"), Some(&Value::from("Chess Club")));

    let id = model.record_id(0).unwrap();
    let row = model.record(id).unwrap().unwrap();
    assert_eq!(row.get("f_title"), Some(&Value::from("Algebra Circle")));
    assert_eq!(row.columns()[0], "id");

    assert!(model.record(9_999_999).unwrap().is_none());
}

#[test]
fn test_connection_lifecycle_is_idempotent() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut store = StoreConnection::new(test_config());
    MigrationManager::new().run_migrations(&mut store).unwrap();

    // Two connects without an intervening close return an equally usable
    // handle; close twice is a no-op; a closed connection reopens lazily.
    store.connect().unwrap();
    store.connect().unwrap();

    let count = query::count("Teacher");
    assert!(store.execute(&count, &[]).unwrap().is_some());

    store.close();
    store.close();
    assert!(store.execute(&count, &[]).unwrap().is_some());
}
