//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger engine. Handlers print
//! results to stdout and report unsaved changes on stderr.

pub mod category;
pub mod expense;
pub mod export;

pub use category::{handle_categories, handle_chart, handle_combine, ChartArgs, CombineArgs};
pub use expense::{
    handle_add, handle_delete, handle_list, handle_reset, handle_show, AddArgs, DeleteArgs,
    ResetArgs, ShowArgs,
};
pub use export::{handle_export, ExportArgs};

use clap::Args;

use crate::error::LedgerResult;
use crate::services::ExpenseFilter;
use crate::storage::Persisted;

/// Date window and category shared by list, chart and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest date to include (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub start: Option<String>,

    /// Latest date to include; a bare date means midnight at its start
    #[arg(long)]
    pub end: Option<String>,

    /// Display category to match
    #[arg(short, long)]
    pub category: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> LedgerResult<ExpenseFilter> {
        ExpenseFilter::parse(
            self.start.as_deref(),
            self.end.as_deref(),
            self.category.as_deref(),
        )
    }
}

/// Parse an `ORIGINAL=NEW` alias argument
pub fn parse_alias(s: &str) -> Result<(String, String), String> {
    let (original, new) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ORIGINAL=NEW, got '{}'", s))?;
    let (original, new) = (original.trim(), new.trim());
    if original.is_empty() || new.is_empty() {
        return Err(format!("both sides of '{}' must be non-empty", s));
    }
    Ok((original.to_string(), new.to_string()))
}

/// Tell the user when a change only exists in memory
pub(crate) fn warn_if_unsaved<T>(outcome: &Persisted<T>) {
    if let Some(e) = &outcome.save_error {
        eprintln!("Warning: change applied but not saved: {}", e);
    }
}
