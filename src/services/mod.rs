//! Service layer for the expense ledger
//!
//! Business logic on top of the storage layer: category aliasing, filtering
//! and the engine facade that ties them to the record store.

pub mod alias;
pub mod filter;
pub mod ledger;

pub use alias::CategoryAliases;
pub use filter::{parse_boundary, ExpenseFilter};
pub use ledger::ExpenseLedger;
