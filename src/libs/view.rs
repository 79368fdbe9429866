use crate::db::connection::Row;
use crate::db::entities::EntitySpec;
use crate::db::model::TableModel;
use prettytable::{Cell, Table};

/// Terminal table rendering for entity records.
pub struct View {}

impl View {
    /// Prints the model's current snapshot as a table, with headers taken
    /// from the entity's field labels.
    pub fn snapshot(model: &TableModel, spec: &EntitySpec) {
        let mut table = Table::new();
        table.add_row(Self::header(spec));

        for row_idx in 0..model.row_count() {
            let mut cells = Vec::with_capacity(model.column_count());
            for col_idx in 0..model.column_count() {
                let text = model.cell(row_idx, col_idx).map(|v| v.to_string()).unwrap_or_default();
                cells.push(Cell::new(&text));
            }
            table.add_row(prettytable::Row::new(cells));
        }
        table.printstd();
    }

    /// Prints store rows (search results, single-record lookups) with the
    /// same headers as the snapshot view.
    pub fn rows(rows: &[Row], spec: &EntitySpec) {
        let mut table = Table::new();
        table.add_row(Self::header(spec));

        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for idx in 0..row.len() {
                let text = row.value_at(idx).map(|v| v.to_string()).unwrap_or_default();
                cells.push(Cell::new(&text));
            }
            table.add_row(prettytable::Row::new(cells));
        }
        table.printstd();
    }

    fn header(spec: &EntitySpec) -> prettytable::Row {
        let mut cells = vec![Cell::new("ID")];
        for field in spec.fields {
            cells.push(Cell::new(&field.label.to_uppercase()));
        }
        prettytable::Row::new(cells)
    }
}
