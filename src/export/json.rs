//! JSON Export functionality
//!
//! Writes the same object layout as the ledger file, so an exported file can
//! be dropped in as `expenses.json` and loaded back unchanged.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Export expenses as a pretty-printed JSON array
pub fn export_expenses_json<W: Write>(expenses: &[&Expense], writer: W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(writer, expenses)
        .map_err(|e| LedgerError::Export(e.to_string()))
}
