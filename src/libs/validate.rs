//! Field-policy validation for user-entered values.
//!
//! Validation is a command-layer concern: the data core accepts whatever
//! scalars it is given, and these checks run on input collected from the
//! user before a value is sent anywhere near the store. Rules are declared
//! per field in the entity registry.

use crate::db::entities::{EntitySpec, FieldSpec, Rule};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{label} must be at least {min} characters long.")]
    TooShort { label: String, min: usize },

    #[error("{label} does not look like a valid email address.")]
    BadEmail { label: String },
}

/// Checks one value against its field's rule.
///
/// `MinLen` marks a required field and always applies. `Email` fields are
/// optional: an empty value passes, a non-empty one must look like an
/// address.
pub fn validate_field(field: &FieldSpec, value: &str) -> Result<(), ValidationError> {
    match field.rule {
        Some(Rule::MinLen(min)) => {
            if value.trim().chars().count() < min {
                return Err(ValidationError::TooShort {
                    label: field.label.to_string(),
                    min,
                });
            }
        }
        Some(Rule::Email) => {
            if !value.trim().is_empty() && !looks_like_email(value.trim()) {
                return Err(ValidationError::BadEmail {
                    label: field.label.to_string(),
                });
            }
        }
        None => {}
    }
    Ok(())
}

/// Checks a full record's values in field order, stopping at the first
/// failure.
pub fn validate_record(spec: &EntitySpec, values: &[String]) -> Result<(), ValidationError> {
    for (field, value) in spec.fields.iter().zip(values) {
        validate_field(field, value)?;
    }
    Ok(())
}

/// Lightweight address shape check: one `@`, a non-empty local part, a
/// dotted domain, no whitespace. Deliverability is not this tool's problem.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.len() >= 3
        }
        None => false,
    }
}
