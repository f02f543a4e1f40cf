//! Ledger engine
//!
//! The single entry point the presentation layer talks to. Owns the record
//! store and the alias table, and routes every read through the filter so
//! listing, charting and exporting agree on what a filter selects.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{self, ExportFormat};
use crate::models::{DisplayRecord, Expense, ExpenseId};
use crate::reports::{aggregate_by_category, CategoryTotals};
use crate::storage::{Persisted, Storage};

use super::alias::CategoryAliases;
use super::filter::ExpenseFilter;

/// Expense ledger engine
pub struct ExpenseLedger {
    storage: Storage,
    aliases: CategoryAliases,
    /// Mappings loaded from disk or made with `combine`; session aliases stay out
    stored_aliases: CategoryAliases,
    settings: Settings,
    load_warnings: Vec<LedgerError>,
}

impl ExpenseLedger {
    /// Open the ledger stored under `paths`
    ///
    /// Only an unusable data directory is fatal. A malformed ledger or alias
    /// file leaves that part empty and is reported through
    /// [`load_warnings`](Self::load_warnings).
    pub fn open(paths: LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        let mut storage = Storage::new(&paths)?;
        let mut load_warnings = Vec::new();

        if let Err(e) = storage.expenses.load() {
            load_warnings.push(e);
        }

        let stored_aliases = if settings.persist_aliases {
            let loaded = storage
                .aliases
                .load()
                .and_then(CategoryAliases::from_mappings)
                .map_err(|e| storage.aliases.reject_file(e));
            match loaded {
                Ok(table) => table,
                Err(e) => {
                    load_warnings.push(e);
                    CategoryAliases::new()
                }
            }
        } else {
            CategoryAliases::new()
        };

        Ok(Self {
            storage,
            aliases: stored_aliases.clone(),
            stored_aliases,
            settings,
            load_warnings,
        })
    }

    /// Problems found while opening
    pub fn load_warnings(&self) -> &[LedgerError] {
        &self.load_warnings
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn aliases(&self) -> &CategoryAliases {
        &self.aliases
    }

    /// All expenses in ledger order
    pub fn expenses(&self) -> &[Expense] {
        self.storage.expenses.expenses()
    }

    pub fn len(&self) -> usize {
        self.storage.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.expenses.is_empty()
    }

    /// Record a new expense stamped with the current local time
    pub fn add_expense(
        &mut self,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> LedgerResult<Persisted<Expense>> {
        let outcome = self
            .storage
            .expenses
            .append(description, amount_text, category)?;
        let expenses = self.storage.expenses.expenses();
        Ok(outcome.map(|index| expenses[index].clone()))
    }

    /// Delete by zero-based ledger position
    pub fn delete_expense(&mut self, index: usize) -> LedgerResult<Persisted<Expense>> {
        self.storage.expenses.remove_at(index)
    }

    /// Delete by stable id
    pub fn delete_expense_by_id(&mut self, id: ExpenseId) -> LedgerResult<Persisted<Expense>> {
        self.storage.expenses.remove_by_id(id)
    }

    /// Expenses matching the filter text, ready for display
    pub fn list_expenses(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        category: Option<&str>,
    ) -> LedgerResult<Vec<DisplayRecord>> {
        let filter = ExpenseFilter::parse(start, end, category)?;
        Ok(self.list_filtered(&filter))
    }

    /// Expenses matching an already parsed filter
    pub fn list_filtered(&self, filter: &ExpenseFilter) -> Vec<DisplayRecord> {
        filter.select_for_display(self.expenses(), &self.aliases)
    }

    /// One expense by ledger position, ready for display
    pub fn show_expense(&self, index: usize) -> LedgerResult<DisplayRecord> {
        let len = self.len();
        self.list_filtered(&ExpenseFilter::new())
            .into_iter()
            .nth(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })
    }

    /// One expense by stable id, ready for display
    pub fn show_expense_by_id(&self, id: ExpenseId) -> LedgerResult<DisplayRecord> {
        self.list_filtered(&ExpenseFilter::new())
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))
    }

    /// Display `original` under `new` from now on
    ///
    /// With alias persistence on, the stored mappings are written to disk;
    /// aliases given with [`alias_for_session`](Self::alias_for_session) are
    /// not. A failed write keeps the mapping for this session and is reported.
    pub fn combine_categories(&mut self, original: &str, new: &str) -> LedgerResult<Persisted<()>> {
        let mut stored = self.stored_aliases.clone();
        stored.add_mapping(original, new)?;
        self.aliases.add_mapping(original, new)?;
        self.stored_aliases = stored;
        info!(original = original.trim(), new = new.trim(), "Combined categories");

        if !self.settings.persist_aliases {
            return Ok(Persisted::saved(()));
        }
        match self.storage.aliases.save(&self.stored_aliases.to_sorted()) {
            Ok(()) => Ok(Persisted::saved(())),
            Err(e) => {
                warn!(error = %e, "Category alias kept in memory but not saved");
                Ok(Persisted::unsaved((), e))
            }
        }
    }

    /// Add a mapping for this session only, never written to disk
    pub fn alias_for_session(&mut self, original: &str, new: &str) -> LedgerResult<()> {
        self.aliases.add_mapping(original, new)
    }

    /// Sorted distinct display categories in the ledger
    pub fn categories(&self) -> Vec<String> {
        self.expenses()
            .iter()
            .map(|e| self.aliases.resolve(e.category()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Per-category totals for the matching expenses
    pub fn chart_data(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        category: Option<&str>,
    ) -> LedgerResult<CategoryTotals> {
        let filter = ExpenseFilter::parse(start, end, category)?;
        Ok(self.totals_for(&filter))
    }

    /// Per-category totals for an already parsed filter
    pub fn totals_for(&self, filter: &ExpenseFilter) -> CategoryTotals {
        let selected = filter.select(self.expenses(), &self.aliases);
        aggregate_by_category(selected.into_iter().map(|(_, e)| e), &self.aliases)
    }

    /// Serialize the matching expenses
    pub fn export_expenses(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        category: Option<&str>,
        format: ExportFormat,
    ) -> LedgerResult<Vec<u8>> {
        let filter = ExpenseFilter::parse(start, end, category)?;
        export::export_to_bytes(&self.selected(&filter), format)
    }

    /// Write the matching expenses to `output`
    ///
    /// Without an explicit format, a `.csv` or `.json` extension decides, and
    /// anything else falls back to the configured default.
    pub fn export_to_path(
        &self,
        filter: &ExpenseFilter,
        output: &Path,
        format: Option<ExportFormat>,
    ) -> LedgerResult<usize> {
        let format = format
            .or_else(|| ExportFormat::from_path(output))
            .unwrap_or(self.settings.default_export_format);
        export::export_to_path(&self.selected(filter), format, output)
    }

    /// Delete every expense. Category aliases are kept.
    pub fn reset_all(&mut self) -> Persisted<usize> {
        self.storage.expenses.clear()
    }

    fn selected(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        filter
            .select(self.expenses(), &self.aliases)
            .into_iter()
            .map(|(_, e)| e)
            .collect()
    }
}
