//! Typed errors shared by domain operations and the record store.

use thiserror::Error;

/// Entity kinds referenced by [`RecordsError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Course,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Student => write!(f, "student"),
            EntityKind::Course => write!(f, "course"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordsError {
    /// Bad user input. Carries every violated constraint so the shell can
    /// report them all at once.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A referenced student or course id does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    /// The persisted file cannot be read back as a record book (parse,
    /// schema, or invariant failure). Recoverable at startup by falling
    /// back to an empty book.
    #[error("record file is corrupt: {0}")]
    Corrupt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordsError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        RecordsError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;
