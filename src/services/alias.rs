//! Category alias table
//!
//! Maps an original category to the name it should be displayed, filtered and
//! aggregated under. Resolution is a single lookup and is never followed
//! transitively.

use std::collections::{BTreeMap, HashMap};

use crate::error::{LedgerError, LedgerResult};

/// Mapping from original category name to display category name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAliases {
    mappings: HashMap<String, String>,
}

impl CategoryAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from stored mappings
    ///
    /// Any set built by [`add_mapping`](Self::add_mapping) is accepted,
    /// including chains. A cycle (`A -> B`, `B -> A`) can only come from a
    /// hand-edited file and is rejected.
    pub fn from_mappings<I>(mappings: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mappings: HashMap<String, String> = mappings.into_iter().collect();

        for start in mappings.keys() {
            let mut current = start.as_str();
            for _ in 0..mappings.len() {
                match mappings.get(current) {
                    Some(next) if next.as_str() != current => current = next.as_str(),
                    _ => break,
                }
                if current == start.as_str() {
                    return Err(LedgerError::Persistence(format!(
                        "Stored category aliases loop back to '{}'",
                        start
                    )));
                }
            }
        }

        Ok(Self { mappings })
    }

    /// The display category for `original`
    pub fn resolve<'a>(&'a self, original: &'a str) -> &'a str {
        self.mappings
            .get(original)
            .map(String::as_str)
            .unwrap_or(original)
    }

    /// Display `original` as `new` from now on
    ///
    /// Both names are trimmed. Re-mapping an existing original replaces its
    /// target. Fails if either name is blank, or if `original` is already the
    /// target of some mapping.
    pub fn add_mapping(&mut self, original: &str, new: &str) -> LedgerResult<()> {
        let original = original.trim();
        let new = new.trim();

        if original.is_empty() || new.is_empty() {
            return Err(LedgerError::Validation(
                "Both original and new category are required".into(),
            ));
        }
        if self.mappings.values().any(|target| target == original) {
            return Err(LedgerError::Validation(format!(
                "'{}' is already a combined category and cannot be renamed again",
                original
            )));
        }

        self.mappings.insert(original.to_string(), new.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Mappings sorted by original name
    pub fn to_sorted(&self) -> BTreeMap<String, String> {
        self.mappings
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
