//! Baseline (old API) resolution
//!
//! Given an ordered list of candidate prior versions, this layer picks the
//! first one the repository can actually deliver and materializes its jars.
//! Candidates are tried most-preferred first; failures accumulate and are
//! only surfaced in aggregate, either as a warning (when a later candidate
//! saved the day) or as the terminal error (when none could).
//!
//! # Modules
//!
//! - [`resolver`]: the candidate scan, override substitution, and jar-set
//!   assembly
//! - [`fetcher`]: collaborator trait implemented by the host build tool's
//!   dependency-resolution layer
//! - [`memo`]: once-per-build memoization of the resolution outcome
//! - [`messages`]: aggregation of per-version failure reasons
//! - [`error`]: per-candidate and terminal error types

pub mod error;
pub mod fetcher;
pub mod memo;
pub mod messages;
pub mod resolver;
