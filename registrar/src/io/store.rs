//! Record book load/save with schema and invariant validation.
//!
//! The persisted format is one JSON file with top-level `students` and
//! `courses` arrays, validated on load against the embedded v1 schema and
//! the semantic invariants. Saves are deterministic (entries sorted by id)
//! and atomic (temp file + rename).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use jsonschema::validator_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::error::{RecordsError, Result};
use crate::records::{Course, RecordBook, Student};

const RECORDS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/student_records/v1.schema.json"
));

/// On-disk shape of the record book.
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    courses: Vec<Course>,
}

/// Load and validate the record book from disk.
///
/// A missing or empty file yields an empty book. Parse, schema, and
/// invariant failures yield [`RecordsError::Corrupt`]; callers decide
/// whether an empty-book fallback is appropriate.
pub fn load_records(path: &Path) -> Result<RecordBook> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no records file, starting empty");
            return Ok(RecordBook::default());
        }
        Err(err) => return Err(err.into()),
    };
    if contents.trim().is_empty() {
        debug!(path = %path.display(), "empty records file, starting empty");
        return Ok(RecordBook::default());
    }

    let value: Value = serde_json::from_str(&contents)
        .map_err(|err| RecordsError::Corrupt(format!("parse {}: {err}", path.display())))?;
    validate_schema(&value)?;
    let file: RecordFile = serde_json::from_value(value)
        .map_err(|err| RecordsError::Corrupt(format!("deserialize {}: {err}", path.display())))?;
    let book = book_from_file(file)?;
    debug!(
        students = book.students.len(),
        courses = book.courses.len(),
        "records loaded"
    );
    Ok(book)
}

/// Atomically write the record book to disk (temp file + rename).
pub fn save_records(path: &Path, book: &RecordBook) -> Result<()> {
    let file = file_from_book(book);
    let mut buf = serde_json::to_string_pretty(&file)
        .map_err(|err| RecordsError::Corrupt(format!("serialize records: {err}")))?;
    buf.push('\n');
    write_atomic(path, &buf)?;
    debug!(
        path = %path.display(),
        students = book.students.len(),
        courses = book.courses.len(),
        "records saved"
    );
    Ok(())
}

fn validate_schema(value: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(RECORDS_SCHEMA).expect("embedded schema should be valid JSON");
    let compiled = validator_for(&schema).expect("embedded schema should compile");
    let messages: Vec<String> = compiled
        .iter_errors(value)
        .map(|err| err.to_string())
        .collect();
    if messages.is_empty() {
        return Ok(());
    }
    Err(RecordsError::Corrupt(format!(
        "schema validation failed: {}",
        messages.join("; ")
    )))
}

fn book_from_file(file: RecordFile) -> Result<RecordBook> {
    let mut book = RecordBook::default();
    let mut errors = Vec::new();

    for student in file.students {
        let id = student.student_id.clone();
        if book.students.insert(id.clone(), student).is_some() {
            errors.push(format!("duplicate student id '{id}'"));
        }
    }
    for course in file.courses {
        let id = course.course_id.clone();
        if book.courses.insert(id.clone(), course).is_some() {
            errors.push(format!("duplicate course id '{id}'"));
        }
    }
    errors.extend(validate_invariants(&book));

    if errors.is_empty() {
        book.sort_records();
        return Ok(book);
    }
    Err(RecordsError::Corrupt(format!(
        "invariant violations: {}",
        errors.join("; ")
    )))
}

fn file_from_book(book: &RecordBook) -> RecordFile {
    let mut sorted = book.clone();
    sorted.sort_records();
    RecordFile {
        students: sorted.students.into_values().collect(),
        courses: sorted.courses.into_values().collect(),
    }
}

fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}
