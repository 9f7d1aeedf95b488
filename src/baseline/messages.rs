//! Aggregation of per-version failure reasons
//!
//! The one place that turns the ordered failure map into operator-readable
//! text. Order is the attempt order as recorded; nothing here re-sorts.

use indexmap::IndexMap;

use crate::artifact::VersionToken;
use crate::baseline::error::CouldNotResolve;

/// Fetch failures keyed by the version actually attempted (after any
/// override), in attempt order.
pub type FailuresByVersion = IndexMap<VersionToken, CouldNotResolve>;

/// Joins every `<version>: <reason>` pair into one block, separated by blank
/// lines, preserving insertion order.
pub fn joined(failures: &FailuresByVersion) -> String {
    failures
        .iter()
        .map(|(version, failure)| format!("{version}: {failure}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
