//! Expense repository for JSON storage
//!
//! Owns the ledger (an ordered list of expenses) and mirrors it to
//! `expenses.json` with a full rewrite after every mutation.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId};

use super::file_io::{move_aside, read_json, write_json_atomic};
use super::Persisted;

/// Repository for the ledger file
pub struct ExpenseRepository {
    path: PathBuf,
    quarantine_path: PathBuf,
    expenses: Vec<Expense>,
    next_id: ExpenseId,
    /// Set when the last load found a malformed file that must not be overwritten in place
    quarantine_pending: bool,
}

impl ExpenseRepository {
    /// Create a repository backed by `path`
    ///
    /// A malformed file found at load time is moved to `quarantine_path` (or a
    /// numbered sibling of it, if taken) before the first save replaces it.
    pub fn new(path: PathBuf, quarantine_path: PathBuf) -> Self {
        Self {
            path,
            quarantine_path,
            expenses: Vec::new(),
            next_id: ExpenseId::from_raw(1),
            quarantine_pending: false,
        }
    }

    /// Load the ledger from disk
    ///
    /// A missing file yields an empty ledger. A malformed file, or one holding
    /// an expense that breaks the field invariants, also leaves the ledger
    /// empty but returns a `Persistence` error describing the problem.
    pub fn load(&mut self) -> LedgerResult<usize> {
        self.expenses.clear();
        self.quarantine_pending = false;

        let loaded: Vec<Expense> = match read_json(&self.path) {
            Ok(loaded) => loaded,
            Err(e) => return Err(self.reject_file(e)),
        };

        if let Some((position, err)) = loaded
            .iter()
            .enumerate()
            .find_map(|(i, expense)| expense.validate().err().map(|err| (i, err)))
        {
            let e = LedgerError::Persistence(format!(
                "Invalid expense at position {} in {}: {}",
                position,
                self.path.display(),
                err
            ));
            return Err(self.reject_file(e));
        }

        for mut expense in loaded {
            let id = self.allocate_id();
            expense.assign_id(id);
            self.expenses.push(expense);
        }

        info!(count = self.expenses.len(), path = %self.path.display(), "Loaded ledger");
        Ok(self.expenses.len())
    }

    fn reject_file(&mut self, err: LedgerError) -> LedgerError {
        warn!(error = %err, "Ledger file unusable; starting with an empty ledger");
        self.quarantine_pending = self.path.exists();
        err
    }

    /// Write the full ledger to disk, replacing the previous content
    pub fn save(&mut self) -> LedgerResult<()> {
        if self.quarantine_pending {
            let moved_to = move_aside(&self.path, &self.quarantine_path).map_err(|e| {
                LedgerError::Persistence(format!(
                    "Refusing to overwrite unreadable ledger {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
            warn!(moved_to = %moved_to.display(), "Moved unreadable ledger file aside");
            self.quarantine_pending = false;
        }

        write_json_atomic(&self.path, &self.expenses)?;
        debug!(count = self.expenses.len(), "Saved ledger");
        Ok(())
    }

    /// Validate and append a new expense, returning its position
    pub fn append(
        &mut self,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> LedgerResult<Persisted<usize>> {
        let expense = Expense::from_input(self.next_id, description, amount_text, category)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.allocate_id();

        info!(
            id = %expense.id(),
            amount = %expense.amount(),
            category = expense.category(),
            "Added expense"
        );
        self.expenses.push(expense);
        let index = self.expenses.len() - 1;
        Ok(self.persist(index))
    }

    /// Remove the expense at a zero-based position
    ///
    /// Every later expense moves up by one, so positions obtained before this
    /// call are stale afterwards.
    pub fn remove_at(&mut self, index: usize) -> LedgerResult<Persisted<Expense>> {
        if index >= self.expenses.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.expenses.len(),
            });
        }

        let removed = self.expenses.remove(index);
        info!(id = %removed.id(), index, "Deleted expense");
        Ok(self.persist(removed))
    }

    /// Remove the expense with the given id
    pub fn remove_by_id(&mut self, id: ExpenseId) -> LedgerResult<Persisted<Expense>> {
        let index = self
            .position_of(id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
        self.remove_at(index)
    }

    /// Remove every expense
    pub fn clear(&mut self) -> Persisted<usize> {
        let removed = self.expenses.len();
        self.expenses.clear();
        info!(removed, "Cleared ledger");
        self.persist(removed)
    }

    /// All expenses in ledger order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    /// Current position of the expense with `id`
    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn allocate_id(&mut self) -> ExpenseId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn persist<T>(&mut self, value: T) -> Persisted<T> {
        match self.save() {
            Ok(()) => Persisted::saved(value),
            Err(e) => {
                warn!(error = %e, "Change kept in memory but not saved");
                Persisted::unsaved(value, e)
            }
        }
    }
}
