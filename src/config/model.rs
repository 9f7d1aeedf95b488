//! Config value types and their copy-on-write mutators
//!
//! Both top-level maps are `BTreeMap`s, so the serialized form is always in
//! sorted key order and independent writers produce identical bytes for
//! logically identical content.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artifact::{ArtifactCoordinate, ArtifactKey, VersionToken};

/// Usage error for a missing or blank justification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a non-empty justification is required")]
pub struct EmptyJustification;

/// Free-text reason attached to accepted breaks. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Justification(String);

impl Justification {
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyJustification> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptyJustification);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Justification> for String {
    fn from(justification: Justification) -> Self {
        justification.0
    }
}

impl TryFrom<String> for Justification {
    type Error = EmptyJustification;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

/// One API-incompatibility finding plus the reason it is acceptable.
///
/// Equality is by full value: recording the same finding twice with the same
/// justification dedupes, while a different justification for the same
/// finding stays a distinct entry. Every reason anyone has given is kept.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AcceptedBreak {
    finding: String,
    justification: Justification,
}

impl AcceptedBreak {
    pub fn new(finding: impl Into<String>, justification: Justification) -> Self {
        Self {
            finding: finding.into(),
            justification,
        }
    }

    pub fn finding(&self) -> &str {
        &self.finding
    }

    pub fn justification(&self) -> &Justification {
        &self.justification
    }
}

/// Accepted breaks recorded against one baseline version, keyed by the
/// dependent artifact family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerBaselineAcceptedBreaks(BTreeMap<ArtifactKey, BTreeSet<AcceptedBreak>>);

impl PerBaselineAcceptedBreaks {
    pub fn accepted_breaks_for(&self, key: &ArtifactKey) -> BTreeSet<AcceptedBreak> {
        self.0.get(key).cloned().unwrap_or_default()
    }

    /// Union-merges `breaks` into the set recorded for `key`, returning a
    /// new value. Nothing is ever removed.
    #[must_use]
    pub fn merged(&self, key: &ArtifactKey, breaks: BTreeSet<AcceptedBreak>) -> Self {
        let mut merged = self.0.clone();
        merged.entry(key.clone()).or_default().extend(breaks);
        Self(merged)
    }

    fn values(&self) -> impl Iterator<Item = &BTreeSet<AcceptedBreak>> {
        self.0.values()
    }
}

/// Root of the persisted acceptance file.
///
/// Immutable: every mutator returns a new config with one entry added or
/// merged. Unknown top-level keys in the file are tolerated on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AcceptanceConfig {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    version_overrides: BTreeMap<ArtifactCoordinate, VersionToken>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    accepted_breaks: BTreeMap<VersionToken, PerBaselineAcceptedBreaks>,
}

impl AcceptanceConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The replacement version configured for exactly this coordinate.
    /// Absence means the requested version is used verbatim.
    pub fn version_override_for(&self, coordinate: &ArtifactCoordinate) -> Option<VersionToken> {
        self.version_overrides.get(coordinate).cloned()
    }

    /// Returns a config that redirects `coordinate` to `replacement`.
    #[must_use]
    pub fn with_version_override(
        &self,
        coordinate: ArtifactCoordinate,
        replacement: VersionToken,
    ) -> Self {
        let mut version_overrides = self.version_overrides.clone();
        version_overrides.insert(coordinate, replacement);

        Self {
            version_overrides,
            accepted_breaks: self.accepted_breaks.clone(),
        }
    }

    /// Every break ever accepted for `key`, flattened across all baseline
    /// versions.
    ///
    /// A break justified against baseline 1.0 stays accepted when the
    /// baseline later moves to 2.0: once a break is justified anywhere in
    /// history it is permanently suppressed for that artifact family.
    pub fn accepted_breaks_for(&self, key: &ArtifactKey) -> BTreeSet<AcceptedBreak> {
        self.accepted_breaks
            .values()
            .flat_map(|per_baseline| per_baseline.accepted_breaks_for(key))
            .collect()
    }

    /// Returns a config with `breaks` union-merged into the set recorded
    /// under (`coordinate.version()`, `coordinate.key()`).
    #[must_use]
    pub fn with_accepted_breaks(
        &self,
        coordinate: &ArtifactCoordinate,
        breaks: BTreeSet<AcceptedBreak>,
    ) -> Self {
        let merged = self
            .accepted_breaks
            .get(coordinate.version())
            .cloned()
            .unwrap_or_default()
            .merged(coordinate.key(), breaks);

        let mut accepted_breaks = self.accepted_breaks.clone();
        accepted_breaks.insert(coordinate.version().clone(), merged);

        Self {
            version_overrides: self.version_overrides.clone(),
            accepted_breaks,
        }
    }

    /// Total number of accepted breaks across all baselines and families.
    pub fn accepted_break_count(&self) -> usize {
        self.accepted_breaks
            .values()
            .flat_map(PerBaselineAcceptedBreaks::values)
            .map(BTreeSet::len)
            .sum()
    }
}
