//! CSV Export functionality
//!
//! One row per expense, in the order given. The category column holds the
//! original category, not the display name.

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

#[derive(Serialize)]
struct CsvRow<'a> {
    date: String,
    description: &'a str,
    amount: String,
    category: &'a str,
}

impl<'a> From<&'a Expense> for CsvRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            date: expense.date_string(),
            description: expense.description(),
            amount: expense.amount().to_plain_string(),
            category: expense.category(),
        }
    }
}

/// Export expenses to CSV with a `date,description,amount,category` header
pub fn export_expenses_csv<W: Write>(expenses: &[&Expense], writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for expense in expenses {
        csv.serialize(CsvRow::from(*expense))?;
    }
    csv.flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
