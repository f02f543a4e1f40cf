//! Alias repository for JSON storage
//!
//! Only used when alias persistence is switched on in the settings. The file
//! carries its own schema version so it can never be mistaken for ledger data.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{move_aside, read_json, write_json_atomic};

/// Current aliases.json schema version
pub const ALIAS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AliasData {
    schema_version: u32,
    mappings: BTreeMap<String, String>,
}

impl Default for AliasData {
    fn default() -> Self {
        Self {
            schema_version: ALIAS_SCHEMA_VERSION,
            mappings: BTreeMap::new(),
        }
    }
}

/// Repository for persisted category aliases
pub struct AliasRepository {
    path: PathBuf,
    quarantine_path: PathBuf,
    /// The file on disk is unusable and must be moved aside before the next write
    quarantine_pending: bool,
}

impl AliasRepository {
    pub fn new(path: PathBuf, quarantine_path: PathBuf) -> Self {
        Self {
            path,
            quarantine_path,
            quarantine_pending: false,
        }
    }

    /// Read the stored mappings; a missing file means no mappings
    ///
    /// An unreadable file or an unknown schema version is reported and
    /// scheduled to be moved aside on the next save.
    pub fn load(&mut self) -> LedgerResult<BTreeMap<String, String>> {
        self.quarantine_pending = false;

        let data: AliasData = match read_json(&self.path) {
            Ok(data) => data,
            Err(e) => return Err(self.reject_file(e)),
        };
        if data.schema_version != ALIAS_SCHEMA_VERSION {
            let e = LedgerError::Persistence(format!(
                "Unsupported alias file version {} in {} (expected {})",
                data.schema_version,
                self.path.display(),
                ALIAS_SCHEMA_VERSION
            ));
            return Err(self.reject_file(e));
        }
        debug!(count = data.mappings.len(), "Loaded category aliases");
        Ok(data.mappings)
    }

    /// Mark the current file unusable after the caller rejected its content
    pub fn reject_file(&mut self, err: LedgerError) -> LedgerError {
        warn!(error = %err, "Alias file unusable; starting without stored aliases");
        self.quarantine_pending = self.path.exists();
        err
    }

    /// Replace the stored mappings
    pub fn save(&mut self, mappings: &BTreeMap<String, String>) -> LedgerResult<()> {
        if self.quarantine_pending {
            let moved_to = move_aside(&self.path, &self.quarantine_path)?;
            warn!(moved_to = %moved_to.display(), "Moved unreadable alias file aside");
            self.quarantine_pending = false;
        }

        let data = AliasData {
            schema_version: ALIAS_SCHEMA_VERSION,
            mappings: mappings.clone(),
        };
        write_json_atomic(&self.path, &data)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo(temp_dir: &TempDir) -> AliasRepository {
        AliasRepository::new(
            temp_dir.path().join("aliases.json"),
            temp_dir.path().join("aliases.corrupt.json"),
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = create_test_repo(&temp_dir);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = create_test_repo(&temp_dir);

        let mut mappings = BTreeMap::new();
        mappings.insert("Dining".to_string(), "Food".to_string());
        repo.save(&mappings).unwrap();

        assert_eq!(repo.load().unwrap(), mappings);

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"schema_version\": 1"));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = create_test_repo(&temp_dir);
        std::fs::write(repo.path(), r#"{"schema_version": 9, "mappings": {}}"#).unwrap();

        assert!(repo.load().unwrap_err().is_persistence());
    }

    #[test]
    fn test_unreadable_file_is_moved_aside_before_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = create_test_repo(&temp_dir);
        std::fs::write(repo.path(), "{broken").unwrap();

        assert!(repo.load().is_err());
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), "{broken");

        let mut mappings = BTreeMap::new();
        mappings.insert("Dining".to_string(), "Food".to_string());
        repo.save(&mappings).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("aliases.corrupt.json")).unwrap(),
            "{broken"
        );
        assert_eq!(repo.load().unwrap(), mappings);
    }
}
