//! Spending totals by display category
//!
//! Feeds the chart view, the summary report and its CSV export. Totals are
//! summed in whole cents and always iterate in alphabetical category order.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money};
use crate::services::CategoryAliases;

/// One row of a category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Display category (after alias resolution)
    pub category: String,
    /// Sum of amounts in this category
    pub total: Money,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of the grand total, 0-100
    pub percentage: f64,
}

/// Totals per display category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: BTreeMap<String, (Money, usize)>,
}

/// Sum amounts per display category
pub fn aggregate_by_category<'a, I>(expenses: I, aliases: &CategoryAliases) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals: BTreeMap<String, (Money, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = totals
            .entry(aliases.resolve(expense.category()).to_string())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount();
        entry.1 += 1;
    }
    CategoryTotals { totals }
}

impl CategoryTotals {
    /// Nothing to report
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Total for one display category
    pub fn get(&self, category: &str) -> Option<Money> {
        self.totals.get(category).map(|(total, _)| *total)
    }

    /// `(category, total)` pairs in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.totals
            .iter()
            .map(|(category, (total, _))| (category.as_str(), *total))
    }

    /// Sum over all categories
    pub fn grand_total(&self) -> Money {
        self.totals.values().map(|(total, _)| *total).sum()
    }

    /// Number of expenses aggregated
    pub fn expense_count(&self) -> usize {
        self.totals.values().map(|(_, count)| count).sum()
    }

    /// Full rows with counts and percentage shares, alphabetical
    pub fn rows(&self) -> Vec<CategoryTotal> {
        let grand_total = self.grand_total();
        self.totals
            .iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.clone(),
                total: *total,
                count: *count,
                percentage: total.percent_of(grand_total),
            })
            .collect()
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        if self.is_empty() {
            return "No expenses to report.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:<30} {:>14} {:>7} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(61));
        output.push('\n');

        for row in self.rows() {
            output.push_str(&format!(
                "{:<30} {:>14} {:>7} {:>6.1}%\n",
                row.category,
                row.total.format_with_symbol(currency_symbol),
                row.count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(61));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14} {:>7}\n",
            "TOTAL",
            self.grand_total().format_with_symbol(currency_symbol),
            self.expense_count()
        ));

        output
    }

    /// Export the breakdown to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["category", "amount", "count", "percentage"])?;
        for row in self.rows() {
            csv.write_record([
                row.category,
                row.total.to_plain_string(),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }
        csv.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}
