//! In-memory table snapshot synchronized with the store.
//!
//! A `TableModel` mirrors one entity table: it holds the rows last loaded
//! from the store, answers cell lookups for display, and writes mutations
//! through before touching the local copy. Each model owns its own
//! `StoreConnection` and the full query set generated for its table, so two
//! models never share a session.
//!
//! The update statement always sets every data column. A single-cell edit
//! therefore resends the rest of the row at its current displayed value,
//! with the record id bound last.

use thiserror::Error;
use tracing::{debug, error};

use super::connection::{Row, StoreConnection, StoreError, Value};
use super::query::{self, GeneratedQuery, QueryError};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("The id column is read-only")]
    ImmutableId,

    #[error("Cell ({row}, {col}) is outside the loaded snapshot")]
    OutOfBounds { row: usize, col: usize },

    #[error("Expected {expected} values, got {given}")]
    ValueCount { expected: usize, given: usize },

    #[error("\"{0}\" is not a column of this table")]
    UnknownColumn(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The statements generated once per table at model construction.
struct QuerySet {
    select: GeneratedQuery,
    select_by_id: GeneratedQuery,
    insert: GeneratedQuery,
    update: GeneratedQuery,
    delete: GeneratedQuery,
    count: GeneratedQuery,
}

type ChangeListener = Box<dyn FnMut()>;

pub struct TableModel {
    table: String,
    /// Declared data columns, excluding the implicit leading `id`.
    columns: Vec<String>,
    queries: QuerySet,
    store: StoreConnection,
    /// Snapshot rows in store order; each row is in column declaration
    /// order with `id` first.
    rows: Vec<Vec<Value>>,
    /// Header names taken from the first loaded row. Retained across empty
    /// refreshes so a drained table keeps its header.
    column_names: Vec<String>,
    on_change: Option<ChangeListener>,
}

impl TableModel {
    /// Builds the model and its query set. Fails only on a misconfigured
    /// schema (empty column list); no store traffic happens here.
    pub fn new(table: &str, columns: &[&str], store: StoreConnection) -> Result<Self, QueryError> {
        let queries = QuerySet {
            select: query::select_all(table),
            select_by_id: query::select_by_id(table),
            insert: query::insert(table, columns)?,
            update: query::update(table, columns)?,
            delete: query::delete(table),
            count: query::count(table),
        };

        Ok(Self {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            queries,
            store,
            rows: Vec::new(),
            column_names: Vec::new(),
            on_change: None,
        })
    }

    /// Registers the callback fired after every successful mutation that
    /// changed the snapshot, so a consumer can redraw.
    pub fn set_on_change(&mut self, listener: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    fn notify_change(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener();
        }
    }

    /// Reloads the snapshot from the store, replacing it wholesale.
    ///
    /// Fail-soft by design: on a store failure the previous snapshot stays
    /// in place and the error is logged, so consumers keep showing stale
    /// but consistent data. Returns whether the snapshot was replaced.
    pub fn refresh(&mut self) -> bool {
        match self.store.execute(&self.queries.select, &[]) {
            Ok(Some(fetched)) => {
                self.rows.clear();
                if let Some(first) = fetched.first() {
                    self.column_names = first.columns().to_vec();
                }
                self.rows = fetched.into_iter().map(Row::into_values).collect();
                debug!(table = %self.table, rows = self.rows.len(), "snapshot refreshed");
                self.notify_change();
                true
            }
            Ok(None) => false,
            Err(e) => {
                error!(table = %self.table, "refresh failed: {}", e);
                false
            }
        }
    }

    /// Inserts one record. `values` must hold exactly one value per data
    /// column, in declaration order; the id is store-assigned.
    ///
    /// The insert and the follow-up refresh commit independently, so a
    /// refresh failure after a successful insert leaves the new row durable
    /// but not yet visible in the snapshot.
    pub fn add(&mut self, values: &[Value]) -> Result<(), ModelError> {
        if values.len() != self.columns.len() {
            return Err(ModelError::ValueCount {
                expected: self.columns.len(),
                given: values.len(),
            });
        }

        self.store.execute(&self.queries.insert, values)?;
        debug!(table = %self.table, "record inserted");
        self.refresh();
        Ok(())
    }

    /// Deletes by record id, then refreshes. The result reflects the
    /// delete alone; deleting an id that is not present still succeeds as
    /// a zero-row delete.
    pub fn delete_record(&mut self, id: i64) -> Result<(), ModelError> {
        self.store.execute(&self.queries.delete, &[Value::Int(id)])?;
        debug!(table = %self.table, id, "record deleted");
        self.refresh();
        Ok(())
    }

    /// Writes one cell through to the store.
    ///
    /// Column 0 is the record id and is never editable. For any other
    /// column the full row is resent: every data column at its current
    /// snapshot value except `col`, which carries `value`, with the id
    /// appended last. The in-memory cell changes only after the store
    /// accepted the update.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Value) -> Result<(), ModelError> {
        if col == 0 {
            return Err(ModelError::ImmutableId);
        }
        let width = self.column_count();
        if row >= self.rows.len() || col >= width {
            return Err(ModelError::OutOfBounds { row, col });
        }

        let mut params: Vec<Value> = Vec::with_capacity(width);
        for idx in 1..width {
            if idx == col {
                params.push(value.clone());
            } else {
                params.push(self.rows[row][idx].clone());
            }
        }
        params.push(self.rows[row][0].clone());

        self.store.execute(&self.queries.update, &params)?;
        self.rows[row][col] = value;
        debug!(table = %self.table, row, col, "cell updated");
        self.notify_change();
        Ok(())
    }

    /// Fetches one record straight from the store, bypassing the snapshot.
    pub fn record(&mut self, id: i64) -> Result<Option<Row>, ModelError> {
        let rows = self.store.execute(&self.queries.select_by_id, &[Value::Int(id)])?;
        Ok(rows.unwrap_or_default().into_iter().next())
    }

    /// Case-insensitive pattern search over one declared column.
    pub fn search(&mut self, field: &str, pattern: &str) -> Result<Vec<Row>, ModelError> {
        if !self.columns.iter().any(|c| c == field) {
            return Err(ModelError::UnknownColumn(field.to_string()));
        }
        let q = query::search_by_field(&self.table, field);
        let rows = self.store.execute(&q, &[Value::Text(pattern.to_string())])?;
        Ok(rows.unwrap_or_default())
    }

    /// Store-side row count, independent of the snapshot.
    pub fn count_in_store(&mut self) -> Result<i64, ModelError> {
        let rows = self.store.execute(&self.queries.count, &[])?;
        let n = rows
            .unwrap_or_default()
            .first()
            .and_then(|r| r.value_at(0))
            .and_then(Value::as_int)
            .unwrap_or(0);
        Ok(n)
    }

    /// Releases the underlying store session.
    pub fn close(&mut self) {
        self.store.close();
    }

    // Snapshot accessors. All reads come from the in-memory copy and never
    // touch the store.

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Snapshot width including the id column; zero before the first
    /// non-empty refresh.
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Declared data columns (no id), as configured at construction.
    pub fn data_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Record id of a snapshot row, if the row exists and its id is an
    /// integer as the schema guarantees.
    pub fn record_id(&self, row: usize) -> Option<i64> {
        self.rows.get(row).and_then(|r| r.first()).and_then(Value::as_int)
    }

    /// Snapshot row index holding the given record id.
    pub fn row_of(&self, id: i64) -> Option<usize> {
        (0..self.rows.len()).find(|&idx| self.record_id(idx) == Some(id))
    }

    #[cfg(test)]
    pub(crate) fn seed(&mut self, column_names: &[&str], rows: Vec<Vec<Value>>) {
        self.column_names = column_names.iter().map(|c| c.to_string()).collect();
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::config::DbConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    fn unreachable_store() -> StoreConnection {
        StoreConnection::new(DbConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            dbname: "roster".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
        })
    }

    fn group_model() -> TableModel {
        let mut model = TableModel::new("StGroup", &["f_title", "f_comment"], unreachable_store()).unwrap();
        model.seed(
            &["id", "f_title", "f_comment"],
            vec![
                vec![Value::Int(1), Value::Text("Group A".into()), Value::Text("note".into())],
                vec![Value::Int(2), Value::Text("Group B".into()), Value::Null],
            ],
        );
        model
    }

    #[test]
    fn empty_schema_fails_at_construction() {
        let err = TableModel::new("StGroup", &[], unreachable_store()).err().unwrap();
        assert_eq!(err, QueryError::InvalidSchema("StGroup".to_string()));
    }

    #[test]
    fn id_column_is_immutable() {
        let mut model = group_model();
        let err = model.set_cell(0, 0, Value::Int(99)).err().unwrap();
        assert!(matches!(err, ModelError::ImmutableId));
        // No store call was made and the snapshot is untouched.
        assert_eq!(model.cell(0, 0), Some(&Value::Int(1)));
    }

    #[test]
    fn id_column_rejection_wins_over_bounds_checks() {
        let mut model = group_model();
        let err = model.set_cell(42, 0, Value::Int(99)).err().unwrap();
        assert!(matches!(err, ModelError::ImmutableId));
    }

    #[test]
    fn set_cell_bounds_are_checked() {
        let mut model = group_model();
        assert!(matches!(
            model.set_cell(5, 1, Value::Text("x".into())),
            Err(ModelError::OutOfBounds { row: 5, col: 1 })
        ));
        assert!(matches!(
            model.set_cell(0, 3, Value::Text("x".into())),
            Err(ModelError::OutOfBounds { row: 0, col: 3 })
        ));
    }

    #[test]
    fn failed_set_cell_keeps_the_old_value() {
        let mut model = group_model();
        let err = model.set_cell(0, 1, Value::Text("renamed".into())).err().unwrap();
        assert!(matches!(err, ModelError::Store(StoreError::Connection(_))));
        assert_eq!(model.cell(0, 1), Some(&Value::Text("Group A".into())));
    }

    #[test]
    fn add_checks_value_arity_before_the_store() {
        let mut model = group_model();
        let err = model.add(&[Value::Text("only title".into())]).err().unwrap();
        assert!(matches!(err, ModelError::ValueCount { expected: 2, given: 1 }));
    }

    #[test]
    fn add_with_dead_store_is_a_store_error() {
        let mut model = group_model();
        let err = model.add(&[Value::Text("t".into()), Value::Null]).err().unwrap();
        assert!(matches!(err, ModelError::Store(StoreError::Connection(_))));
    }

    #[test]
    fn refresh_is_fail_soft() {
        let mut model = group_model();
        assert!(!model.refresh());
        // The stale snapshot remains readable.
        assert_eq!(model.row_count(), 2);
        assert_eq!(model.cell(1, 1), Some(&Value::Text("Group B".into())));
    }

    #[test]
    fn failed_operations_do_not_notify() {
        let mut model = group_model();
        let fired = Rc::new(Cell::new(0u32));
        let probe = Rc::clone(&fired);
        model.set_on_change(move || probe.set(probe.get() + 1));

        let _ = model.set_cell(0, 0, Value::Int(7));
        let _ = model.set_cell(0, 1, Value::Text("x".into()));
        let _ = model.refresh();

        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn search_rejects_undeclared_columns() {
        let mut model = group_model();
        let err = model.search("id; DROP TABLE x", "%a%").err().unwrap();
        assert!(matches!(err, ModelError::UnknownColumn(_)));
    }

    #[test]
    fn snapshot_accessors_cover_ids_and_cells() {
        let model = group_model();
        assert_eq!(model.row_count(), 2);
        assert_eq!(model.column_count(), 3);
        assert_eq!(model.column_names(), ["id", "f_title", "f_comment"]);
        assert_eq!(model.record_id(1), Some(2));
        assert_eq!(model.row_of(2), Some(1));
        assert_eq!(model.row_of(99), None);
        assert_eq!(model.cell(1, 2), Some(&Value::Null));
        assert_eq!(model.cell(9, 0), None);
    }
}
