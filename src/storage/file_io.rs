//! JSON file helpers for the ledger's data files
//!
//! Writes go through a sibling `*.tmp` file that is synced and renamed over
//! the target, so `expenses.json` is either the old ledger or the new one.
//! Unreadable files are never overwritten in place: [`move_aside`] parks them
//! under a name that is not yet taken.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Persistence(format!("Could not {} {}: {}", action, path.display(), err))
}

/// Parse a JSON data file; an absent file yields `T::default()`
pub fn read_json<T, P>(path: P) -> LedgerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staging = path.with_extension("json.tmp");
    let staged = stage(&staging, data);
    if let Err(e) = staged.and_then(|()| {
        fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e))
    }) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    Ok(())
}

fn stage<T: Serialize + ?Sized>(staging: &Path, data: &T) -> LedgerResult<()> {
    let file = File::create(staging).map_err(|e| storage_error("create", staging, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, data).map_err(|e| storage_error("encode", staging, e))?;
    out.flush().map_err(|e| storage_error("write", staging, e))?;
    out.get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", staging, e))
}

/// Move an unreadable file out of the way, returning where it went
///
/// `preferred` is used when free; otherwise a counter is inserted before the
/// extension (`expenses.corrupt.1.json`, `expenses.corrupt.2.json`, ...).
/// Existing files are never replaced.
pub fn move_aside(path: &Path, preferred: &Path) -> LedgerResult<PathBuf> {
    let target = free_name(preferred);
    fs::rename(path, &target).map_err(|e| storage_error("move aside", path, e))?;
    Ok(target)
}

fn free_name(preferred: &Path) -> PathBuf {
    if !preferred.exists() {
        return preferred.to_path_buf();
    }
    let stem = preferred
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = preferred
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (1u32..)
        .map(|n| preferred.with_file_name(format!("{}.{}.{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| preferred.to_path_buf())
}
