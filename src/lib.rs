//! api-baseline compares the public API of a newly built artifact against a
//! previously published baseline of the same artifact.
//!
//! The crate is split into two concerns:
//!
//! - [`baseline`]: picking the baseline artifact to compare against. A caller
//!   supplies an ordered list of candidate versions; the resolver tries each
//!   one against an [`baseline::ArtifactFetcher`] collaborator and returns the
//!   first that materializes, aggregating the failures of the rest.
//! - [`config`]: the on-disk acceptance file recording version overrides
//!   ("when asked to compare against vX, actually use vY") and accepted API
//!   breaks, merged immutably and rewritten atomically.
//!
//! The API diff itself is produced by an external analyzer; [`analysis`] only
//! reads its results file back in order to accept the reported findings.

pub mod analysis;
pub mod artifact;
pub mod baseline;
pub mod config;
