//! Declarative registry of the managed entities.
//!
//! Everything the rest of the crate needs to know about an entity lives in
//! one `EntitySpec`: the store table, the data columns in declaration
//! order, and per-field input behavior (label, multiline entry, validation
//! rule). Command handlers build models, prompts and validators from this
//! table instead of hard-coding per-entity logic.

/// Input policy attached to a field, enforced by the command layer before a
/// value reaches the store. The store itself accepts any scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Trimmed value must be at least this many characters.
    MinLen(usize),
    /// Value must look like an email address.
    Email,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Column name in the store table.
    pub name: &'static str,
    /// Human-facing label used in prompts and table headers.
    pub label: &'static str,
    /// Multiline fields accept editor-style input instead of a single line.
    pub multiline: bool,
    pub rule: Option<Rule>,
}

#[derive(Debug, Clone, Copy)]
pub struct EntitySpec {
    /// CLI-facing identifier (`roster teacher ...`).
    pub key: &'static str,
    /// Display name for messages and headers.
    pub title: &'static str,
    /// Store table name; quoted verbatim into generated statements.
    pub table: &'static str,
    /// Data columns in declaration order. The `id` column is implicit and
    /// always first in store results.
    pub fields: &'static [FieldSpec],
}

impl EntitySpec {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Looks a field up by column name or by label (case-insensitive), so
    /// `set` accepts either `f_email` or `Email`.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.label.eq_ignore_ascii_case(name))
    }

    /// Snapshot column index of a field, accounting for the leading id.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name || f.label.eq_ignore_ascii_case(name))
            .map(|pos| pos + 1)
    }
}

pub const TEACHER: EntitySpec = EntitySpec {
    key: "teacher",
    title: "Teacher",
    table: "Teacher",
    fields: &[
        FieldSpec { name: "f_fio", label: "Full name", multiline: false, rule: Some(Rule::MinLen(5)) },
        FieldSpec { name: "f_phone", label: "Phone", multiline: false, rule: None },
        FieldSpec { name: "f_email", label: "Email", multiline: false, rule: Some(Rule::Email) },
        FieldSpec { name: "f_comment", label: "Comment", multiline: true, rule: None },
    ],
};

pub const STUDENT: EntitySpec = EntitySpec {
    key: "student",
    title: "Student",
    table: "Student",
    fields: &[
        FieldSpec { name: "f_fio", label: "Full name", multiline: false, rule: Some(Rule::MinLen(5)) },
        FieldSpec { name: "f_email", label: "Email", multiline: false, rule: Some(Rule::Email) },
        FieldSpec { name: "f_comment", label: "Comment", multiline: true, rule: None },
    ],
};

pub const ST_GROUP: EntitySpec = EntitySpec {
    key: "group",
    title: "Study group",
    table: "StGroup",
    fields: &[
        FieldSpec { name: "f_title", label: "Title", multiline: false, rule: Some(Rule::MinLen(3)) },
        FieldSpec { name: "f_comment", label: "Comment", multiline: true, rule: None },
    ],
};

/// All managed entities, in menu order.
pub const ALL: &[&EntitySpec] = &[&TEACHER, &STUDENT, &ST_GROUP];
