//! Expense model
//!
//! An expense is immutable once recorded: it is created from user input,
//! stamped with the local time, and later only ever removed as a whole.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::{self, Money, MoneyParseError};

/// Timestamp layout used in the ledger file and in exports
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single recorded expense
///
/// Field order matches the on-disk object layout:
/// `description`, `amount`, `category`, `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Session-local handle, assigned by the store
    #[serde(skip)]
    id: ExpenseId,

    /// What the money was spent on
    description: String,

    /// Strictly positive amount
    #[serde(with = "money::as_number")]
    amount: Money,

    /// Category exactly as entered; aliases never rewrite it
    category: String,

    /// Local time of insertion, second resolution
    #[serde(with = "timestamp")]
    date: NaiveDateTime,
}

impl Expense {
    /// Build an expense from raw user input, stamped with the current local time
    pub(crate) fn from_input(
        id: ExpenseId,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> Result<Self, ExpenseValidationError> {
        let description = description.trim();
        let amount_text = amount_text.trim();
        let category = category.trim();

        let mut missing = Vec::new();
        if description.is_empty() {
            missing.push("description");
        }
        if amount_text.is_empty() {
            missing.push("amount");
        }
        if category.is_empty() {
            missing.push("category");
        }
        if !missing.is_empty() {
            return Err(ExpenseValidationError::MissingFields(missing));
        }

        let amount = Money::parse(amount_text).map_err(ExpenseValidationError::InvalidAmount)?;
        let expense = Self {
            id,
            description: description.to_string(),
            amount,
            category: category.to_string(),
            date: now_local(),
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Build an expense with an explicit timestamp
    #[cfg(test)]
    pub(crate) fn at(
        id: u64,
        description: &str,
        cents: i64,
        category: &str,
        date: &str,
    ) -> Self {
        Self {
            id: ExpenseId::from_raw(id),
            description: description.to_string(),
            amount: Money::from_cents(cents),
            category: category.to_string(),
            date: NaiveDateTime::parse_from_str(date, DATE_FORMAT).unwrap(),
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// The original category, as entered and as persisted
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Timestamp formatted the way it is stored
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub(crate) fn assign_id(&mut self, id: ExpenseId) {
        self.id = id;
    }

    /// Check the field invariants every stored expense must hold
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::MissingFields(vec!["description"]));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingFields(vec!["category"]));
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date_string(),
            self.description,
            self.amount,
            self.category
        )
    }
}

/// An expense as presented to the user after alias resolution
///
/// Carries the ledger position at the time of the query so a selection can
/// later be deleted. Positions go stale after any deletion; `id` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Zero-based position in the ledger when this record was produced
    pub index: usize,
    pub id: ExpenseId,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: Money,
    /// Stored category, unaffected by aliases
    pub category: String,
    /// Category after alias resolution
    pub display_category: String,
}

/// The current local time truncated to whole seconds
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    MissingFields(Vec<&'static str>),
    InvalidAmount(MoneyParseError),
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "All fields are required (missing: {})", fields.join(", "))
            }
            Self::InvalidAmount(e) => write!(f, "{}", e),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive number, got {}", amount.to_plain_string())
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` timestamp text
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, DATE_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", text, e)))
    }
}
