//! Shared command handlers for the managed entities.
//!
//! The teacher, student and group commands all expose the same set of
//! actions; the per-entity modules only bind an `EntitySpec` to the generic
//! runner here. Input collection and validation live in this layer, so the
//! data core below it never sees a value that bypassed the field rules.

use crate::db::connection::{StoreConnection, Value};
use crate::db::entities::EntitySpec;
use crate::db::model::TableModel;
use crate::libs::{config::Config, messages::Message, validate, view::View};
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warn};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Editor, Input};

#[derive(Debug, Subcommand)]
pub enum EntityAction {
    /// Add a new record
    Add(AddArgs),
    /// List all records
    List,
    /// Show a single record
    Show {
        /// Record id
        id: i64,
    },
    /// Edit one field of a record
    Set {
        /// Record id
        id: i64,
        /// Field name or label, e.g. 'f_email' or 'Email'
        field: String,
        /// New value
        value: String,
    },
    /// Delete records
    Rm(RmArgs),
    /// Search records by field value
    Find {
        /// Field name or label to search in
        field: String,
        /// Substring to match, case-insensitive
        pattern: String,
    },
    /// Count records in the store
    Count,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Field values in declaration order; omit to be prompted
    #[arg(value_name = "VALUE")]
    values: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RmArgs {
    /// Record ids to delete
    #[arg(required = true)]
    ids: Vec<i64>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Entry point shared by all entity commands.
pub fn run(spec: &'static EntitySpec, action: EntityAction) -> Result<()> {
    let config = Config::read()?;
    if !config.has_database() {
        msg_error!(Message::ConfigNotInitialized);
        return Ok(());
    }

    let store = StoreConnection::new(config.database_or_default());
    let mut model = TableModel::new(spec.table, &spec.column_names(), store)?;

    match action {
        EntityAction::Add(args) => handle_add(&mut model, spec, args),
        EntityAction::List => handle_list(&mut model, spec),
        EntityAction::Show { id } => handle_show(&mut model, spec, id),
        EntityAction::Set { id, field, value } => handle_set(&mut model, spec, id, field, value),
        EntityAction::Rm(args) => handle_rm(&mut model, spec, args),
        EntityAction::Find { field, pattern } => handle_find(&mut model, spec, field, pattern),
        EntityAction::Count => handle_count(&mut model, spec),
    }
}

fn handle_add(model: &mut TableModel, spec: &EntitySpec, args: AddArgs) -> Result<()> {
    let values = if args.values.is_empty() {
        collect_values(spec)?
    } else {
        if args.values.len() != spec.fields.len() {
            msg_error!(Message::RecordAddFailed(
                spec.title.to_string(),
                format!("expected {} values, got {}", spec.fields.len(), args.values.len())
            ));
            return Ok(());
        }
        if let Err(e) = validate::validate_record(spec, &args.values) {
            msg_error!(e);
            return Ok(());
        }
        args.values
    };

    let bound: Vec<Value> = values.into_iter().map(Value::Text).collect();
    match model.add(&bound) {
        Ok(()) => msg_success!(Message::RecordAdded(spec.title.to_string())),
        Err(e) => msg_error!(Message::RecordAddFailed(spec.title.to_string(), e.to_string())),
    }
    Ok(())
}

/// Prompts for every field in declaration order, building the input form
/// from the field specs. Single-line fields validate inline and re-prompt
/// on a rule violation; multiline fields open an editor.
fn collect_values(spec: &EntitySpec) -> Result<Vec<String>> {
    let mut values = Vec::with_capacity(spec.fields.len());
    for field in spec.fields {
        let value = if field.multiline {
            Editor::new().edit("")?.unwrap_or_default().trim_end().to_string()
        } else {
            Input::with_theme(&ColorfulTheme::default())
                .with_prompt(field.label)
                .allow_empty(true)
                .validate_with(|input: &String| validate::validate_field(field, input).map_err(|e| e.to_string()))
                .interact_text()?
        };
        values.push(value);
    }
    Ok(values)
}

fn handle_list(model: &mut TableModel, spec: &EntitySpec) -> Result<()> {
    if !model.refresh() {
        msg_warn!(Message::SnapshotStale(spec.title.to_string()));
    }
    if model.row_count() == 0 {
        msg_info!(Message::NoRecordsFound(spec.title.to_string()));
        return Ok(());
    }

    msg_print!(Message::RecordsHeader(spec.title.to_string()), true);
    View::snapshot(model, spec);
    Ok(())
}

fn handle_show(model: &mut TableModel, spec: &EntitySpec, id: i64) -> Result<()> {
    match model.record(id) {
        Ok(Some(row)) => View::rows(&[row], spec),
        Ok(None) => msg_info!(Message::RecordNotFound(spec.title.to_string(), id)),
        Err(e) => msg_error!(e),
    }
    Ok(())
}

fn handle_set(model: &mut TableModel, spec: &EntitySpec, id: i64, field: String, value: String) -> Result<()> {
    if field.eq_ignore_ascii_case("id") {
        msg_error!(Message::IdColumnReadOnly);
        return Ok(());
    }
    let (field_spec, col) = match (spec.field(&field), spec.column_index(&field)) {
        (Some(f), Some(col)) => (f, col),
        _ => {
            msg_error!(Message::UnknownField(field, spec.title.to_string()));
            return Ok(());
        }
    };
    if let Err(e) = validate::validate_field(field_spec, &value) {
        msg_error!(e);
        return Ok(());
    }

    model.refresh();
    let row = match model.row_of(id) {
        Some(row) => row,
        None => {
            msg_error!(Message::RecordNotFound(spec.title.to_string(), id));
            return Ok(());
        }
    };

    match model.set_cell(row, col, Value::Text(value)) {
        Ok(()) => msg_success!(Message::CellUpdated(spec.title.to_string(), field_spec.label.to_string())),
        Err(e) => msg_error!(Message::CellUpdateFailed(field_spec.label.to_string(), e.to_string())),
    }
    Ok(())
}

fn handle_rm(model: &mut TableModel, spec: &EntitySpec, args: RmArgs) -> Result<()> {
    if !args.yes {
        msg_print!(Message::RecordsToBeDeleted(spec.title.to_string()));
        for id in &args.ids {
            println!("  {} {}", spec.title, id);
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteRecords(args.ids.len()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let mut deleted = 0usize;
    let mut failed = 0usize;
    for id in args.ids {
        match model.delete_record(id) {
            Ok(()) => deleted += 1,
            Err(e) => {
                failed += 1;
                msg_error!(Message::RecordDeleteFailed(spec.title.to_string(), id, e.to_string()));
            }
        }
    }

    msg_success!(Message::RecordsDeletedCount(deleted));
    if failed > 0 {
        msg_warn!(Message::RecordsDeleteFailedCount(failed));
    }
    Ok(())
}

fn handle_find(model: &mut TableModel, spec: &EntitySpec, field: String, pattern: String) -> Result<()> {
    let field_spec = match spec.field(&field) {
        Some(f) => f,
        None => {
            msg_error!(Message::UnknownField(field, spec.title.to_string()));
            return Ok(());
        }
    };

    match model.search(field_spec.name, &format!("%{}%", pattern)) {
        Ok(rows) if rows.is_empty() => msg_info!(Message::NoMatchesFound(spec.title.to_string(), pattern)),
        Ok(rows) => {
            msg_print!(Message::SearchResultsHeader(spec.title.to_string(), pattern), true);
            View::rows(&rows, spec);
        }
        Err(e) => msg_error!(e),
    }
    Ok(())
}

fn handle_count(model: &mut TableModel, spec: &EntitySpec) -> Result<()> {
    match model.count_in_store() {
        Ok(count) => msg_print!(Message::RecordCount(spec.title.to_string(), count)),
        Err(e) => msg_error!(e),
    }
    Ok(())
}
