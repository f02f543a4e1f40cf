//! Display formatting for terminal output
//!
//! Turns engine results into plain text: the expense register and the
//! category charts.

pub mod chart;
pub mod expense;

pub use chart::{format_bar_chart, format_pie_chart, ChartKind};
pub use expense::{format_expense_details, format_expense_register, format_expense_row};

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
