//! Stable expense identifiers
//!
//! Positions shift whenever an earlier expense is deleted, so every expense
//! also gets an id from a per-session counter. Ids are never written to the
//! ledger file; they are reassigned in file order on every load.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

const DISPLAY_PREFIX: &str = "exp-";

/// Opaque handle for one expense within a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// Create an id from its raw counter value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The id that follows this one
    pub(crate) const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}
