//! Field-level checks shared by the entity drafts.

use super::ValidationError;

/// Trims `value` and requires it to be non-empty and at most `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    within(field, value, max)
}

/// Trims `value`; an empty result becomes `None`.
pub fn optional(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => within(field, v, max).map(Some),
    }
}

/// A required address with one `@` separating non-empty parts and a dotted domain.
pub fn email(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value, 120)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::invalid_format(field, "not a valid email address"));
    }
    Ok(value)
}

fn within(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(value.to_string())
}
