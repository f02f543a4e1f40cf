//! Storage layer for the expense ledger
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod aliases;
pub mod expenses;
pub mod file_io;

pub use aliases::AliasRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{move_aside, read_json, write_json_atomic};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Outcome of a mutation that was applied in memory
///
/// The change always stands; `save_error` reports whether writing it to disk
/// failed, in which case it may not survive a restart.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub save_error: Option<LedgerError>,
}

impl<T> Persisted<T> {
    pub fn saved(value: T) -> Self {
        Self {
            value,
            save_error: None,
        }
    }

    pub fn unsaved(value: T, error: LedgerError) -> Self {
        Self {
            value,
            save_error: Some(error),
        }
    }

    /// Whether the change reached disk
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Persisted<U> {
        Persisted {
            value: f(self.value),
            save_error: self.save_error,
        }
    }
}

/// Storage coordinator that provides access to all repositories
pub struct Storage {
    pub expenses: ExpenseRepository,
    pub aliases: AliasRepository,
}

impl Storage {
    /// Create the data directory if needed and set up the repositories
    pub fn new(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file(), paths.quarantine_file()),
            aliases: AliasRepository::new(paths.aliases_file(), paths.aliases_quarantine_file()),
        })
    }
}
