//! Export module
//!
//! Writes a selection of expenses in one of two formats:
//! - CSV: `date,description,amount,category`, spreadsheet-compatible
//! - JSON: the same objects the ledger file holds, so an export can be loaded back
//!
//! An empty selection is refused with [`LedgerError::NothingToExport`] rather
//! than producing an empty file.

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::export_expenses_json;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON array
    #[default]
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension (`.csv` or `.json`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Write `expenses` in `format`, returning how many were written
pub fn export_expenses<W: Write>(
    expenses: &[&Expense],
    format: ExportFormat,
    writer: W,
) -> LedgerResult<usize> {
    if expenses.is_empty() {
        return Err(LedgerError::NothingToExport);
    }

    match format {
        ExportFormat::Csv => export_expenses_csv(expenses, writer)?,
        ExportFormat::Json => export_expenses_json(expenses, writer)?,
    }
    Ok(expenses.len())
}

/// Export into an in-memory byte buffer
pub fn export_to_bytes(expenses: &[&Expense], format: ExportFormat) -> LedgerResult<Vec<u8>> {
    let mut buffer = Vec::new();
    export_expenses(expenses, format, &mut buffer)?;
    Ok(buffer)
}

/// Export to a file, creating or truncating it
///
/// The file is not touched when there is nothing to export.
pub fn export_to_path(
    expenses: &[&Expense],
    format: ExportFormat,
    output: &Path,
) -> LedgerResult<usize> {
    if expenses.is_empty() {
        return Err(LedgerError::NothingToExport);
    }

    let file = File::create(output).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    let count = export_expenses(expenses, format, &mut writer)?;
    writer.flush().map_err(|e| {
        LedgerError::Export(format!("Failed to write {}: {}", output.display(), e))
    })?;

    info!(count, format = ?format, path = %output.display(), "Exported expenses");
    Ok(count)
}
