//! Artifact fetch collaborator interface

use std::collections::BTreeSet;
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use crate::artifact::{ArtifactCoordinate, ArtifactKey};
use crate::baseline::error::CouldNotResolve;

/// Trait for materializing baseline artifacts from a repository.
///
/// Implemented by the host build tool's dependency-resolution layer; this
/// crate only consumes it. Failures are reported synchronously as
/// [`CouldNotResolve`] values carrying a human-readable cause; retry and
/// timeout policy belong to the implementation.
#[cfg_attr(test, automock)]
pub trait ArtifactFetcher: Send + Sync {
    /// Materializes just the artifact's own jar(s) at `coordinate`.
    fn fetch_primary(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> Result<BTreeSet<PathBuf>, CouldNotResolve>;

    /// Materializes the artifact plus its transitive dependency closure.
    fn fetch_transitive(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> Result<BTreeSet<PathBuf>, CouldNotResolve>;

    /// Succeeds when any version of the family has ever been published,
    /// without pinning a specific one.
    fn probe_any_version(&self, key: &ArtifactKey) -> Result<(), CouldNotResolve>;
}
