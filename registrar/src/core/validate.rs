//! Field-level validation for user-supplied record data.
//!
//! Each check returns `Some(message)` on violation so callers can collect
//! every failure into one stable list.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Date format used for dates of birth and record stamps.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static COURSE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

static LETTER_GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-D][+-]?|F)$").unwrap());

/// Non-empty check for name-like fields.
pub fn name_error(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{field} must not be empty"));
    }
    None
}

pub fn email_error(value: &str) -> Option<String> {
    if EMAIL_RE.is_match(value) {
        return None;
    }
    Some(format!("email '{value}' is not a valid address"))
}

/// Dates must parse as `YYYY-MM-DD`.
pub fn date_error(field: &str, value: &str) -> Option<String> {
    if NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok() {
        return None;
    }
    Some(format!("{field} '{value}' must be a date in YYYY-MM-DD format"))
}

/// Course ids are single tokens: letters, digits, underscores, dashes.
pub fn course_id_error(value: &str) -> Option<String> {
    if COURSE_ID_RE.is_match(value) {
        return None;
    }
    Some(format!(
        "course id '{value}' must contain only letters, digits, '_' or '-'"
    ))
}

/// A grade is a letter grade (`A+` through `F`) or a score in `0..=100`.
pub fn grade_value_error(value: &str) -> Option<String> {
    if LETTER_GRADE_RE.is_match(value) {
        return None;
    }
    if let Ok(score) = value.parse::<f64>() {
        if (0.0..=100.0).contains(&score) {
            return None;
        }
    }
    Some(format!(
        "grade '{value}' must be a letter grade (A+ through F) or a score between 0 and 100"
    ))
}
