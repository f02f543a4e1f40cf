//! expense-ledger - personal expense tracking from the terminal
//!
//! Records expenses in a JSON ledger, lets categories be shown under other
//! names after the fact, and filters, totals and exports what was spent.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: The `LedgerError` type
//! - `models`: Expenses, money and ids
//! - `storage`: JSON files with atomic writes
//! - `services`: Category aliases, filtering and the `ExpenseLedger` engine
//! - `reports`: Per-category totals
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::{LedgerPaths, Settings};
//! use expense_ledger::services::ExpenseLedger;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut ledger = ExpenseLedger::open(paths, settings)?;
//! ledger.add_expense("Coffee", "3.50", "Dining")?;
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use services::ExpenseLedger;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber once
///
/// `RUST_LOG` takes precedence; otherwise only warnings from this crate show.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_ledger=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
