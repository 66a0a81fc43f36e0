//! Parsing of submitted form fields.
//!
//! Forms arrive as plain strings. Each helper records a field error instead
//! of failing, so one submission reports every bad field at once.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::foundation::{DomainError, FieldErrors, Money, Timestamp, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Select boxes submit `0` or nothing for "none".
fn is_blank_choice(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == "0"
}

/// An optional select. Blank means `None`; anything unparseable is not a
/// valid choice.
pub fn choice<T: FromStr>(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<T> {
    if is_blank_choice(raw) {
        return None;
    }
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(ValidationError::invalid(field, "Not a valid choice"));
            None
        }
    }
}

/// A select that must be answered.
pub fn required_choice<T: FromStr>(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<T> {
    if is_blank_choice(raw) {
        errors.push(ValidationError::empty_field(field));
        return None;
    }
    choice(errors, field, raw)
}

pub fn optional_date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(ValidationError::invalid_format(field, "expected a date like 2024-01-31"));
            None
        }
    }
}

pub fn required_date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(ValidationError::empty_field(field));
        return None;
    }
    optional_date(errors, field, raw)
}

/// A `datetime-local` value (taken as UTC) or an RFC 3339 timestamp. Blank
/// falls back to `default`.
pub fn timestamp_or(errors: &mut FieldErrors, field: &str, raw: &str, default: Timestamp) -> Timestamp {
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Timestamp::from_datetime(dt.with_timezone(&Utc));
    }
    if let Some(dt) = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Timestamp::from_naive_utc(dt);
    }
    errors.push(ValidationError::invalid_format(field, "expected a date and time like 2024-01-31T18:30"));
    default
}

/// A required finite decimal number.
pub fn number(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(ValidationError::empty_field(field));
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            errors.push(ValidationError::invalid_format(field, "expected a number"));
            None
        }
    }
}

/// A required whole number of days.
pub fn days(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(ValidationError::empty_field(field));
        return None;
    }
    match raw.parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(ValidationError::invalid_format(field, "expected a whole number of days"));
            None
        }
    }
}

pub fn money(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<Money> {
    errors.check(Money::parse(field, raw))
}

/// Checkboxes are present only when ticked.
pub fn checkbox(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    )
}

/// Blank optional text becomes `None`.
pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

/// Unwraps a value whose parse error is already recorded.
pub fn present<T>(value: Option<T>, field: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| ValidationError::empty_field(field).into())
}
