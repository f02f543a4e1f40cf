//! Expense filtering
//!
//! Selects the expenses inside an inclusive date window whose display
//! category matches. Date text is parsed up front: if any boundary is
//! unparseable the whole filter is rejected and nothing is selected.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{DisplayRecord, Expense};

use super::alias::CategoryAliases;

/// Accepted layouts for boundaries that include a time of day
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Accepted layouts for date-only boundaries
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a filter boundary
///
/// A date-only value means midnight at the start of that day, on either side
/// of the window. `--end 2024-01-02` therefore stops before anything recorded
/// later on the 2nd.
pub fn parse_boundary(text: &str) -> LedgerResult<NaiveDateTime> {
    let text = text.trim();

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Ok(datetime);
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| {
            LedgerError::Filter(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
                text
            ))
        })?;

    Ok(date.and_time(NaiveTime::MIN))
}

/// Criteria for selecting expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Earliest timestamp to include
    pub start: Option<NaiveDateTime>,
    /// Latest timestamp to include
    pub end: Option<NaiveDateTime>,
    /// Display category to match exactly
    pub category: Option<String>,
}

impl ExpenseFilter {
    /// A filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from user-supplied text
    ///
    /// Blank strings count as absent. Any unparseable date fails the whole
    /// filter with a `Filter` error.
    pub fn parse(
        start: Option<&str>,
        end: Option<&str>,
        category: Option<&str>,
    ) -> LedgerResult<Self> {
        fn present(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        Ok(Self {
            start: present(start).map(parse_boundary).transpose()?,
            end: present(end).map(parse_boundary).transpose()?,
            category: present(category).map(str::to_string),
        })
    }

    /// Filter by earliest timestamp
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Filter by latest timestamp
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Filter by display category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether this filter lets everything through
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.category.is_none()
    }

    /// Whether a single expense passes every supplied constraint
    pub fn matches(&self, expense: &Expense, aliases: &CategoryAliases) -> bool {
        if self.start.is_some_and(|start| expense.date() < start) {
            return false;
        }
        if self.end.is_some_and(|end| expense.date() > end) {
            return false;
        }
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => aliases.resolve(expense.category()) == category,
            _ => true,
        }
    }

    /// Matching expenses with their ledger positions, in ledger order
    pub fn select<'a>(
        &self,
        expenses: &'a [Expense],
        aliases: &CategoryAliases,
    ) -> Vec<(usize, &'a Expense)> {
        let selected: Vec<_> = expenses
            .iter()
            .enumerate()
            .filter(|(_, expense)| self.matches(expense, aliases))
            .collect();
        debug!(total = expenses.len(), selected = selected.len(), filter = ?self, "Filtered expenses");
        selected
    }

    /// Matching expenses prepared for display
    pub fn select_for_display(
        &self,
        expenses: &[Expense],
        aliases: &CategoryAliases,
    ) -> Vec<DisplayRecord> {
        self.select(expenses, aliases)
            .into_iter()
            .map(|(index, expense)| DisplayRecord {
                index,
                id: expense.id(),
                date: expense.date(),
                description: expense.description().to_string(),
                amount: expense.amount(),
                category: expense.category().to_string(),
                display_category: aliases.resolve(expense.category()).to_string(),
            })
            .collect()
    }
}
