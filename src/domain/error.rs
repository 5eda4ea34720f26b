//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy rules.
/// These are independent of I/O and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("index out of range: row {row}, column {column}")]
    IndexOutOfRange { row: usize, column: usize },

    #[error("duplicate label in hierarchy: {label}")]
    DuplicateLabel { label: String },

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("tree is empty")]
    EmptyTree,
}

impl DomainError {
    /// Malformed input located at a 1-based input line.
    pub fn at_line(line: usize, message: impl std::fmt::Display) -> Self {
        Self::MalformedInput(format!("line {line}: {message}"))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
