//! Core data models for the expense ledger
//!
//! Expenses, their stable ids, and the exact-cents money type.

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::{DisplayRecord, Expense, ExpenseValidationError, DATE_FORMAT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
