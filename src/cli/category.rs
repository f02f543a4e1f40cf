//! Category CLI commands
//!
//! Combining categories, listing display categories and charting totals.

use std::io;

use clap::Args;

use crate::display::{format_bar_chart, format_pie_chart, ChartKind};
use crate::error::LedgerResult;
use crate::services::ExpenseLedger;

use super::{warn_if_unsaved, FilterArgs};

/// Arguments for `combine`
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Category as recorded
    pub original: String,
    /// Name to show it under
    pub new: String,
}

/// Arguments for `chart`
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Chart style
    #[arg(short, long, value_enum, default_value_t = ChartKind::Bar)]
    pub kind: ChartKind,

    /// Also print a table with counts and shares
    #[arg(long)]
    pub table: bool,

    /// Print the totals as CSV instead of a chart
    #[arg(long, conflicts_with_all = ["kind", "table"])]
    pub csv: bool,
}

pub fn handle_combine(ledger: &mut ExpenseLedger, args: CombineArgs) -> LedgerResult<()> {
    let outcome = ledger.combine_categories(&args.original, &args.new)?;
    warn_if_unsaved(&outcome);
    println!(
        "Category '{}' will be displayed as '{}'.",
        args.original.trim(),
        args.new.trim()
    );
    Ok(())
}

pub fn handle_categories(ledger: &ExpenseLedger) -> LedgerResult<()> {
    let categories = ledger.categories();
    if categories.is_empty() {
        println!("No categories yet.");
    }
    for category in categories {
        println!("{}", category);
    }
    Ok(())
}

pub fn handle_chart(ledger: &ExpenseLedger, args: ChartArgs) -> LedgerResult<()> {
    let totals = ledger.chart_data(
        args.filter.start.as_deref(),
        args.filter.end.as_deref(),
        args.filter.category.as_deref(),
    )?;
    let symbol = &ledger.settings().currency_symbol;

    if args.csv {
        return totals.export_csv(io::stdout().lock());
    }

    match args.kind {
        ChartKind::Bar => print!("{}", format_bar_chart(&totals, symbol)),
        ChartKind::Pie => print!("{}", format_pie_chart(&totals, symbol)),
    }
    if args.table && !totals.is_empty() {
        println!();
        print!("{}", totals.format_terminal(symbol));
    }
    Ok(())
}
