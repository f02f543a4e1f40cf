//! Expense display formatting
//!
//! The register shows each expense's ledger position, which is what
//! `delete` takes, and its display category.

use crate::models::DisplayRecord;

use super::truncate;

/// Format a single expense as a register row
pub fn format_expense_row(record: &DisplayRecord, currency_symbol: &str) -> String {
    format!(
        "{:>4} {:19} {:28} {:>12} {}",
        record.index,
        record.date.format(crate::models::DATE_FORMAT),
        truncate(&record.description, 28),
        record.amount.format_with_symbol(currency_symbol),
        record.display_category
    )
}

/// Format expenses as a register table
pub fn format_expense_register(records: &[DisplayRecord], currency_symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4} {:19} {:28} {:>12} {}\n",
        "#", "Date", "Description", "Amount", "Category"
    ));
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for record in records {
        output.push_str(&format_expense_row(record, currency_symbol));
        output.push('\n');
    }

    output
}

/// Format one expense in full
pub fn format_expense_details(record: &DisplayRecord, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {} (position {})\n", record.id, record.index));
    output.push_str(&format!(
        "Date:        {}\n",
        record.date.format(crate::models::DATE_FORMAT)
    ));
    output.push_str(&format!("Description: {}\n", record.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount.format_with_symbol(currency_symbol)
    ));
    if record.display_category == record.category {
        output.push_str(&format!("Category:    {}\n", record.category));
    } else {
        output.push_str(&format!(
            "Category:    {} (recorded as {})\n",
            record.display_category, record.category
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money, DATE_FORMAT};
    use chrono::NaiveDateTime;

    fn record() -> DisplayRecord {
        DisplayRecord {
            index: 3,
            id: ExpenseId::from_raw(7),
            date: NaiveDateTime::parse_from_str("2024-01-01 08:00:00", DATE_FORMAT).unwrap(),
            description: "Coffee".into(),
            amount: Money::from_cents(350),
            category: "Dining".into(),
            display_category: "Food".into(),
        }
    }

    #[test]
    fn test_row_shows_position_and_display_category() {
        let row = format_expense_row(&record(), "$");
        assert!(row.trim_start().starts_with("3 2024-01-01 08:00:00"));
        assert!(row.contains("$3.50"));
        assert!(row.ends_with("Food"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_expense_register(&[], "$"), "No expenses found.\n");
    }

    #[test]
    fn test_register_has_header() {
        let output = format_expense_register(&[record()], "€");
        assert!(output.starts_with("   # Date"));
        assert!(output.contains("€3.50"));
    }

    #[test]
    fn test_details_mention_recorded_category() {
        let output = format_expense_details(&record(), "$");
        assert!(output.contains("exp-7"));
        assert!(output.contains("Food (recorded as Dining)"));
    }
}
