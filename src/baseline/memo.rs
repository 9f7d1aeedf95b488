//! Once-per-build memoization of the resolution outcome
//!
//! Resolution reaches out through the fetch collaborator, which is slow and
//! externally visible, so the embedding build must evaluate it at most once
//! per invocation. The cell caches the first non-fatal outcome for the
//! lifetime of the build. A fatal error is returned without being cached:
//! it aborts the build, so there is no later call to replay it for.

use std::sync::Mutex;

use crate::baseline::error::ResolveError;
use crate::baseline::resolver::ResolvedBaseline;

/// Write-once cell holding the baseline outcome for one build invocation.
///
/// No eviction; the cell lives and dies with the build.
#[derive(Debug, Default)]
pub struct MemoizedBaseline {
    slot: Mutex<Option<Option<ResolvedBaseline>>>,
}

impl MemoizedBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached outcome, running `resolve` only when nothing has
    /// been cached yet. The lock is held across `resolve`, so a concurrent
    /// caller waits for the first evaluation instead of duplicating it.
    pub fn get_or_resolve<F>(&self, resolve: F) -> Result<Option<ResolvedBaseline>, ResolveError>
    where
        F: FnOnce() -> Result<Option<ResolvedBaseline>, ResolveError>,
    {
        let mut slot = self.slot.lock().map_err(|_| ResolveError::Poisoned)?;

        if let Some(outcome) = slot.as_ref() {
            return Ok(outcome.clone());
        }

        let outcome = resolve()?;
        *slot = Some(outcome.clone());
        Ok(outcome)
    }
}
