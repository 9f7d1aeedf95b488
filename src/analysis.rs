//! Analyzer results file ingestion
//!
//! The API diff itself is produced by an external analyzer. Its results file
//! is a JSON document listing the findings of one run; the only thing this
//! crate needs from it is turning every finding into an accepted break under
//! one supplied justification.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::config::model::{AcceptedBreak, Justification};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("could not read analysis results: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed analysis results: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The findings reported by one analyzer run.
///
/// Finding identifiers are opaque to this crate; they only need to be stable
/// so that an accepted break matches the same finding on the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisResults {
    findings: Vec<String>,
}

impl AnalysisResults {
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    /// Turns every finding into an accepted break under one justification,
    /// deduplicated as a set.
    pub fn to_accepted_breaks(&self, justification: &Justification) -> BTreeSet<AcceptedBreak> {
        self.findings
            .iter()
            .map(|finding| AcceptedBreak::new(finding.clone(), justification.clone()))
            .collect()
    }
}
