//! Text charts of per-category totals
//!
//! Bar: one line per category scaled to the largest total.
//! Pie: a single strip split by share, with a legend.

use clap::ValueEnum;

use crate::reports::CategoryTotals;

use super::truncate;

/// Width of the bars and of the pie strip, in cells
const CHART_WIDTH: usize = 40;

/// Fill glyphs cycled through the pie legend
const PIE_GLYPHS: &[char] = &['█', '▓', '▒', '░', '#', '*', '+', '='];

/// Chart style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

/// A bar of `width` cells, filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Horizontal bar chart, alphabetical by category
pub fn format_bar_chart(totals: &CategoryTotals, currency_symbol: &str) -> String {
    if totals.is_empty() {
        return "No expenses to chart.\n".to_string();
    }

    let max = totals
        .iter()
        .map(|(_, total)| total.cents())
        .max()
        .unwrap_or(0) as f64;

    let mut output = String::new();
    for (category, total) in totals.iter() {
        output.push_str(&format!(
            "{:20} {} {:>12}\n",
            truncate(category, 20),
            format_bar(total.cents() as f64, max, CHART_WIDTH),
            total.format_with_symbol(currency_symbol)
        ));
    }
    output
}

/// Pie chart rendered as a proportional strip plus legend
pub fn format_pie_chart(totals: &CategoryTotals, currency_symbol: &str) -> String {
    if totals.is_empty() {
        return "No expenses to chart.\n".to_string();
    }

    let rows = totals.rows();

    let mut strip = String::new();
    let mut used = 0usize;
    let mut cumulative = 0.0;
    for (i, row) in rows.iter().enumerate() {
        cumulative += row.percentage;
        // Rounded running edge; the last slice takes the remainder
        let edge = ((cumulative / 100.0) * CHART_WIDTH as f64).round() as usize;
        let edge = if i + 1 == rows.len() { CHART_WIDTH } else { edge.min(CHART_WIDTH) };
        let glyph = PIE_GLYPHS[i % PIE_GLYPHS.len()];
        strip.extend(std::iter::repeat(glyph).take(edge.saturating_sub(used)));
        used = used.max(edge);
    }

    let mut output = format!("[{}]\n\n", strip);
    for (i, row) in rows.iter().enumerate() {
        output.push_str(&format!(
            "{} {:20} {:>6.1}% {:>12}\n",
            PIE_GLYPHS[i % PIE_GLYPHS.len()],
            truncate(&row.category, 20),
            row.percentage,
            row.total.format_with_symbol(currency_symbol)
        ));
    }
    output
}
