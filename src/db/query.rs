//! SQL text generation for the entity tables.
//!
//! Every entity table shares the same shape: an `id SERIAL PRIMARY KEY`
//! followed by a fixed list of data columns. The functions here map a table
//! name and column list onto the parameterized statements the rest of the
//! crate executes, so no module ever assembles SQL by hand.
//!
//! Table and column names are trusted schema constants taken from the entity
//! registry; only those are interpolated into the statement text. Values
//! always travel as bound parameters and never touch the SQL string.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Column list for table \"{0}\" is empty")]
    InvalidSchema(String),
}

/// Whether executing a statement produces a result set.
///
/// The connection layer fetches rows for `Read` statements and only reports
/// completion for `Write` statements, independent of how many parameters the
/// statement takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Read,
    Write,
}

/// A parameterized SQL statement plus its binding contract.
///
/// Built once per table at model construction and reused for every
/// execution. `params` is the exact number of positional parameters the
/// statement expects; the connection layer rejects any other count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuery {
    pub text: String,
    pub params: usize,
    pub kind: QueryKind,
}

impl GeneratedQuery {
    fn read(text: String, params: usize) -> Self {
        Self { text, params, kind: QueryKind::Read }
    }

    fn write(text: String, params: usize) -> Self {
        Self { text, params, kind: QueryKind::Write }
    }
}

/// `SELECT * FROM "t" ORDER BY id`
pub fn select_all(table: &str) -> GeneratedQuery {
    GeneratedQuery::read(format!("SELECT * FROM \"{}\" ORDER BY id", table), 0)
}

/// `SELECT * FROM "t" WHERE id = $1`
pub fn select_by_id(table: &str) -> GeneratedQuery {
    GeneratedQuery::read(format!("SELECT * FROM \"{}\" WHERE id = $1", table), 1)
}

/// `INSERT INTO "t" (c1, c2) VALUES ($1, $2)`
///
/// Parameters bind in `columns` order.
pub fn insert(table: &str, columns: &[&str]) -> Result<GeneratedQuery, QueryError> {
    if columns.is_empty() {
        return Err(QueryError::InvalidSchema(table.to_string()));
    }
    let placeholders = (1..=columns.len()).map(|n| format!("${}", n)).collect::<Vec<_>>().join(", ");
    let text = format!("INSERT INTO \"{}\" ({}) VALUES ({})", table, columns.join(", "), placeholders);
    Ok(GeneratedQuery::write(text, columns.len()))
}

/// `UPDATE "t" SET c1 = $1, c2 = $2 WHERE id = $3`
///
/// Parameters bind in `columns` order with the record id last. The statement
/// always sets every data column, so a single-cell edit resends the rest of
/// the row unchanged.
pub fn update(table: &str, columns: &[&str]) -> Result<GeneratedQuery, QueryError> {
    if columns.is_empty() {
        return Err(QueryError::InvalidSchema(table.to_string()));
    }
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ${}", col, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!("UPDATE \"{}\" SET {} WHERE id = ${}", table, assignments, columns.len() + 1);
    Ok(GeneratedQuery::write(text, columns.len() + 1))
}

/// `DELETE FROM "t" WHERE id = $1`
pub fn delete(table: &str) -> GeneratedQuery {
    GeneratedQuery::write(format!("DELETE FROM \"{}\" WHERE id = $1", table), 1)
}

/// `SELECT COUNT(*) FROM "t"`
pub fn count(table: &str) -> GeneratedQuery {
    GeneratedQuery::read(format!("SELECT COUNT(*) FROM \"{}\"", table), 0)
}

/// `SELECT * FROM "t" WHERE f ILIKE $1 ORDER BY id`
///
/// The caller is responsible for ensuring `field` is a declared column of
/// the table; the model layer checks this against its schema.
pub fn search_by_field(table: &str, field: &str) -> GeneratedQuery {
    GeneratedQuery::read(format!("SELECT * FROM \"{}\" WHERE {} ILIKE $1 ORDER BY id", table, field), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_orders_by_id() {
        let q = select_all("Teacher");
        assert_eq!(q.text, "SELECT * FROM \"Teacher\" ORDER BY id");
        assert_eq!(q.params, 0);
        assert_eq!(q.kind, QueryKind::Read);
    }

    #[test]
    fn insert_binds_one_placeholder_per_column() {
        let q = insert("StGroup", &["f_title", "f_comment"]).unwrap();
        assert_eq!(q.text, "INSERT INTO \"StGroup\" (f_title, f_comment) VALUES ($1, $2)");
        assert_eq!(q.params, 2);
        assert_eq!(q.kind, QueryKind::Write);
    }

    #[test]
    fn update_appends_id_after_column_values() {
        let q = update("Teacher", &["f_fio", "f_phone", "f_email", "f_comment"]).unwrap();
        assert_eq!(
            q.text,
            "UPDATE \"Teacher\" SET f_fio = $1, f_phone = $2, f_email = $3, f_comment = $4 WHERE id = $5"
        );
        assert_eq!(q.params, 5);
    }

    #[test]
    fn empty_columns_are_rejected() {
        assert_eq!(insert("Student", &[]), Err(QueryError::InvalidSchema("Student".to_string())));
        assert_eq!(update("Student", &[]), Err(QueryError::InvalidSchema("Student".to_string())));
    }

    #[test]
    fn delete_and_count_take_fixed_parameter_counts() {
        let del = delete("Student");
        assert_eq!(del.text, "DELETE FROM \"Student\" WHERE id = $1");
        assert_eq!(del.params, 1);
        assert_eq!(del.kind, QueryKind::Write);

        let cnt = count("Student");
        assert_eq!(cnt.text, "SELECT COUNT(*) FROM \"Student\"");
        assert_eq!(cnt.params, 0);
        assert_eq!(cnt.kind, QueryKind::Read);
    }

    #[test]
    fn search_is_a_parameterized_read() {
        let q = search_by_field("Student", "f_fio");
        assert_eq!(q.text, "SELECT * FROM \"Student\" WHERE f_fio ILIKE $1 ORDER BY id");
        assert_eq!(q.params, 1);
        assert_eq!(q.kind, QueryKind::Read);
    }
}
