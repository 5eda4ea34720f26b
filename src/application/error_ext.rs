//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::DomainError;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs::read_to_string(&path)
    ///     .with_path_context("read pairs", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait turning CSV reader errors into malformed-input errors.
pub trait CsvResultExt<T> {
    fn or_malformed(self) -> ApplicationResult<T>;
}

impl<T> CsvResultExt<T> for Result<T, csv::Error> {
    fn or_malformed(self) -> ApplicationResult<T> {
        self.map_err(|e| {
            let err = match e.position() {
                Some(pos) => DomainError::at_line(pos.line() as usize, &e),
                None => DomainError::MalformedInput(e.to_string()),
            };
            ApplicationError::Domain(err)
        })
    }
}
