//! Expense CLI commands
//!
//! Adding, listing, showing and deleting expenses, and wiping the ledger.

use clap::Args;

use crate::display::{format_expense_details, format_expense_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::ExpenseId;
use crate::services::ExpenseLedger;

use super::{warn_if_unsaved, FilterArgs};

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was spent on
    pub description: String,
    /// Amount, e.g. "3.50" or "1200"
    pub amount: String,
    /// Category as recorded
    pub category: String,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Position shown by `list`
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub position: Option<usize>,

    /// Expense id instead of a position (e.g. exp-3)
    #[arg(long)]
    pub id: Option<ExpenseId>,
}

/// Arguments for `show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Position shown by `list`
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub position: Option<usize>,

    /// Expense id instead of a position (e.g. exp-3)
    #[arg(long)]
    pub id: Option<ExpenseId>,
}

/// Arguments for `reset`
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Confirm deleting every expense
    #[arg(long)]
    pub yes: bool,
}

pub fn handle_add(ledger: &mut ExpenseLedger, args: AddArgs) -> LedgerResult<()> {
    let outcome = ledger.add_expense(&args.description, &args.amount, &args.category)?;
    warn_if_unsaved(&outcome);

    let expense = &outcome.value;
    println!(
        "Added {}: {} {} ({})",
        expense.id(),
        expense.description(),
        expense
            .amount()
            .format_with_symbol(&ledger.settings().currency_symbol),
        expense.category()
    );
    Ok(())
}

pub fn handle_list(ledger: &ExpenseLedger, filter: &FilterArgs) -> LedgerResult<()> {
    let records = ledger.list_expenses(
        filter.start.as_deref(),
        filter.end.as_deref(),
        filter.category.as_deref(),
    )?;
    print!(
        "{}",
        format_expense_register(&records, &ledger.settings().currency_symbol)
    );
    Ok(())
}

pub fn handle_show(ledger: &ExpenseLedger, args: ShowArgs) -> LedgerResult<()> {
    let record = match (args.id, args.position) {
        (Some(id), _) => ledger.show_expense_by_id(id)?,
        (None, Some(position)) => ledger.show_expense(position)?,
        (None, None) => {
            return Err(LedgerError::Validation(
                "Give a position or --id to show".into(),
            ))
        }
    };
    print!(
        "{}",
        format_expense_details(&record, &ledger.settings().currency_symbol)
    );
    Ok(())
}

pub fn handle_delete(ledger: &mut ExpenseLedger, args: DeleteArgs) -> LedgerResult<()> {
    let outcome = match (args.id, args.position) {
        (Some(id), _) => ledger.delete_expense_by_id(id)?,
        (None, Some(position)) => ledger.delete_expense(position)?,
        (None, None) => {
            return Err(LedgerError::Validation(
                "Give a position or --id to delete".into(),
            ))
        }
    };
    warn_if_unsaved(&outcome);
    println!("Deleted: {}", outcome.value);
    Ok(())
}

pub fn handle_reset(ledger: &mut ExpenseLedger, args: ResetArgs) -> LedgerResult<()> {
    if !args.yes {
        return Err(LedgerError::Validation(
            "Refusing to delete all expenses without --yes".into(),
        ));
    }

    let outcome = ledger.reset_all();
    warn_if_unsaved(&outcome);
    println!("Deleted {} expense(s).", outcome.value);
    Ok(())
}
