//! Baseline resolution across an ordered list of candidate versions
//!
//! Candidates arrive most-preferred first (e.g. an exact release, then a
//! floating marker). The first one the fetcher can materialize wins and the
//! rest are never tried; a fallback past failed candidates is logged so the
//! substitution stays auditable.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::warn;

use crate::artifact::{ArtifactCoordinate, ArtifactKey, VersionToken};
use crate::baseline::error::{CouldNotResolve, ResolveError};
use crate::baseline::fetcher::ArtifactFetcher;
use crate::baseline::messages::{self, FailuresByVersion};
use crate::config::model::AcceptanceConfig;

/// The materialized old API to diff against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBaseline {
    /// The baseline artifact's own jar(s).
    pub jars: BTreeSet<PathBuf>,

    /// Jars of the baseline's transitive dependencies. Never contains a
    /// file that is also in `jars`.
    pub dependency_jars: BTreeSet<PathBuf>,
}

/// Resolves the baseline for `key`, trying `candidate_versions` in order and
/// returning the first one the fetcher materializes.
///
/// `Ok(None)` means there is nothing to compare against: either no
/// candidates were requested, or nothing has ever been published under this
/// family at all. Per-candidate failures never escape; when every candidate
/// fails but published versions do exist, the terminal error lists each
/// attempted version with its own cause.
pub fn resolve_baseline<F>(
    fetcher: &F,
    config: &AcceptanceConfig,
    key: &ArtifactKey,
    candidate_versions: &[String],
) -> Result<Option<ResolvedBaseline>, ResolveError>
where
    F: ArtifactFetcher + ?Sized,
{
    if candidate_versions.is_empty() {
        return Ok(None);
    }

    let mut failures = FailuresByVersion::new();

    for candidate in candidate_versions {
        let requested = key.at_version(VersionToken::new(candidate.clone()));
        let coordinate = possibly_overridden(config, requested);

        match fetch_with_dependencies(fetcher, &coordinate) {
            Ok(baseline) => {
                if !failures.is_empty() {
                    warn!(
                        "{} has resolved successfully. At first we tried versions {:?}, but they failed to resolve with these errors:\n\n{}",
                        coordinate,
                        failures.keys().map(VersionToken::as_str).collect::<Vec<_>>(),
                        messages::joined(&failures),
                    );
                }
                return Ok(Some(baseline));
            }
            Err(failure) => {
                failures.insert(coordinate.version().clone(), failure);
            }
        }
    }

    // Distinguish "these versions are wrong" from "nothing was ever
    // published": a family with no published versions cannot regress.
    if fetcher.probe_any_version(key).is_err() {
        return Ok(None);
    }

    Err(ResolveError::NoRequestedVersionResolved {
        artifact: key.clone(),
        failures: messages::joined(&failures),
    })
}

fn fetch_with_dependencies<F>(
    fetcher: &F,
    coordinate: &ArtifactCoordinate,
) -> Result<ResolvedBaseline, CouldNotResolve>
where
    F: ArtifactFetcher + ?Sized,
{
    let jars = fetcher.fetch_primary(coordinate)?;
    let with_dependencies = fetcher.fetch_transitive(coordinate)?;

    // The primary jar must never double as its own dependency.
    let dependency_jars = with_dependencies.difference(&jars).cloned().collect();

    Ok(ResolvedBaseline {
        jars,
        dependency_jars,
    })
}

fn possibly_overridden(
    config: &AcceptanceConfig,
    requested: ArtifactCoordinate,
) -> ArtifactCoordinate {
    match config.version_override_for(&requested) {
        Some(replacement) => requested.with_version(replacement),
        None => requested,
    }
}
