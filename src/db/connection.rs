//! PostgreSQL connection management and statement execution.
//!
//! One `StoreConnection` owns one physical connection. The connection is
//! opened lazily on the first `execute` (or explicit `connect`) call and
//! stays open until `close` drops it, so a sequence of operations reuses a
//! single session. Every statement commits on its own; there is no
//! multi-statement transaction support at this level.
//!
//! Failures are never retried here. They surface as typed `StoreError`
//! values for the model layer to handle, with a log record emitted at the
//! point of failure.

use bytes::BytesMut;
use postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use postgres::{Client, NoTls};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::query::{GeneratedQuery, QueryKind};
use crate::libs::config::DbConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] postgres::Error),

    #[error("Database query failed: {0}")]
    Query(#[source] postgres::Error),

    #[error("Statement expects {expected} parameters, got {given}")]
    ParamCount { expected: usize, given: usize },
}

/// A nullable scalar cell value.
///
/// This is the only value shape that crosses the store boundary in either
/// direction: text and integer columns map onto `Text` and `Int`, SQL NULL
/// maps onto `Null`, and anything else a query might return is treated as
/// NULL rather than failing the whole row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i64),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Text(s) => {
                if is_text_type(ty) {
                    s.as_str().to_sql(ty, out)
                } else {
                    Err(format!("cannot bind text value to column type {}", ty).into())
                }
            }
            Value::Int(n) => {
                if *ty == Type::INT2 {
                    i16::try_from(*n)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*n)?.to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    n.to_sql(ty, out)
                } else {
                    Err(format!("cannot bind integer value to column type {}", ty).into())
                }
            }
        }
    }

    fn accepts(ty: &Type) -> bool {
        is_text_type(ty) || *ty == Type::INT2 || *ty == Type::INT4 || *ty == Type::INT8
    }

    to_sql_checked!();
}

/// One result row: field names and cell values in column declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    fn from_store(row: &postgres::Row) -> Self {
        let columns = row.columns().iter().map(|c| c.name().to_string()).collect();
        let values = (0..row.len()).map(|idx| cell_value(row, idx)).collect();
        Self { columns, values }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().position(|c| c == name).and_then(|idx| self.values.get(idx))
    }

    pub fn value_at(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

fn is_text_type(ty: &Type) -> bool {
    *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR || *ty == Type::NAME
}

/// Reads one cell, mapping unsupported column types and conversion faults
/// to NULL instead of failing the row.
fn cell_value(row: &postgres::Row, idx: usize) -> Value {
    let ty = row.columns()[idx].type_();
    if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx).ok().flatten().map_or(Value::Null, |n| Value::Int(n as i64))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx).ok().flatten().map_or(Value::Null, |n| Value::Int(n as i64))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx).ok().flatten().map_or(Value::Null, Value::Int)
    } else if is_text_type(ty) {
        row.try_get::<_, Option<String>>(idx).ok().flatten().map_or(Value::Null, Value::Text)
    } else {
        Value::Null
    }
}

/// Owner of one lazily-opened database session.
pub struct StoreConnection {
    config: DbConfig,
    client: Option<Client>,
}

impl StoreConnection {
    pub fn new(config: DbConfig) -> Self {
        Self { config, client: None }
    }

    /// Opens the connection if needed and returns the live handle.
    ///
    /// Idempotent: while the session is open, repeated calls return the same
    /// handle without reopening. A handle that reports closed (for example
    /// after the server dropped the session) is replaced with a fresh one.
    pub fn connect(&mut self) -> Result<&mut Client, StoreError> {
        if !matches!(&self.client, Some(client) if !client.is_closed()) {
            let client = postgres::Config::new()
                .host(&self.config.host)
                .port(self.config.port)
                .dbname(&self.config.dbname)
                .user(&self.config.user)
                .password(&self.config.password)
                .connect(NoTls)
                .map_err(|e| {
                    error!(host = %self.config.host, port = self.config.port, dbname = %self.config.dbname, "connection failed: {}", e);
                    StoreError::Connection(e)
                })?;

            debug!(host = %self.config.host, dbname = %self.config.dbname, "connected to database");
            self.client = Some(client);
        }

        Ok(self.client.as_mut().expect("client is present after ensuring connection"))
    }

    /// Binds `params` positionally and executes the statement.
    ///
    /// Returns `Some(rows)` for `QueryKind::Read` statements and `None` for
    /// `QueryKind::Write` ones. Each call commits independently.
    pub fn execute(&mut self, query: &GeneratedQuery, params: &[Value]) -> Result<Option<Vec<Row>>, StoreError> {
        if params.len() != query.params {
            return Err(StoreError::ParamCount {
                expected: query.params,
                given: params.len(),
            });
        }

        let client = self.connect()?;
        let bound: Vec<&(dyn ToSql + Sync)> = params.iter().map(|v| v as &(dyn ToSql + Sync)).collect();

        match query.kind {
            QueryKind::Read => {
                let rows = client.query(query.text.as_str(), &bound).map_err(|e| {
                    error!(statement = %query.text, "query failed: {}", e);
                    StoreError::Query(e)
                })?;
                Ok(Some(rows.iter().map(Row::from_store).collect()))
            }
            QueryKind::Write => {
                client.execute(query.text.as_str(), &bound).map_err(|e| {
                    error!(statement = %query.text, "statement failed: {}", e);
                    StoreError::Query(e)
                })?;
                Ok(None)
            }
        }
    }

    /// Releases the session if one is open. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close() {
                warn!("error while closing database connection: {}", e);
            } else {
                debug!("database connection closed");
            }
        }
    }
}

impl Drop for StoreConnection {
    fn drop(&mut self) {
        self.close();
    }
}
