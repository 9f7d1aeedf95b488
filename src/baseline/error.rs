use thiserror::Error;

use crate::artifact::ArtifactKey;

/// A single candidate baseline version that could not be fetched.
///
/// Recoverable on its own: the resolver records it and moves on to the next
/// candidate. Only the aggregated outcome is ever visible to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct CouldNotResolve {
    cause: String,
}

impl CouldNotResolve {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// Terminal failure of baseline resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Published versions of the artifact exist, but none of the requested
    /// candidates could be fetched. The message lists every attempted
    /// version with its own cause, in attempt order.
    #[error(
        "failed to resolve a baseline for {artifact}. We tried the following versions:\n\n{failures}"
    )]
    NoRequestedVersionResolved {
        artifact: ArtifactKey,
        failures: String,
    },

    /// The memoization lock was poisoned by a panicking caller.
    #[error("baseline resolution state poisoned")]
    Poisoned,
}
