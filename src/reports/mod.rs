//! Reports module
//!
//! Per-category spending totals used for summaries and charts.

pub mod category_totals;

pub use category_totals::{aggregate_by_category, CategoryTotal, CategoryTotals};
