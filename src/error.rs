//! Error types for the expense ledger
//!
//! Every rejected operation maps to a distinct variant so the presentation
//! layer can tell a bad amount apart from a stale position or a failed save.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// User input violates a field invariant (blank field, bad amount, alias cycle)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A filter date string could not be parsed
    #[error("Invalid filter: {0}")]
    Filter(String),

    /// A deletion position no longer exists in the ledger
    #[error("No expense at position {index} (ledger has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The backing store could not be read, parsed or written
    #[error("Storage error: {0}")]
    Persistence(String),

    /// The current selection is empty
    #[error("Nothing to export: no expenses match the current filters")]
    NothingToExport,

    /// Export destination or encoding failures
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses addressed by id
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a filter error
    pub fn is_filter(&self) -> bool {
        matches!(self, Self::Filter(_))
    }

    /// Check if this is a stale or out-of-range position
    pub fn is_index(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a storage error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is any kind of export failure
    pub fn is_export(&self) -> bool {
        matches!(self, Self::NothingToExport | Self::Export(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Validation("Amount must be positive".into());
        assert_eq!(err.to_string(), "Validation error: Amount must be positive");
    }

    #[test]
    fn test_index_error() {
        let err = LedgerError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "No expense at position 5 (ledger has 2 entries)"
        );
        assert!(err.is_index());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::expense_not_found("exp-7");
        assert_eq!(err.to_string(), "Expense not found: exp-7");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_export_kinds() {
        assert!(LedgerError::NothingToExport.is_export());
        assert!(LedgerError::Export("disk full".into()).is_export());
        assert!(!LedgerError::Filter("bad".into()).is_export());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
