//! Validation report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{SpecError, Violation};

/// Final state of a validation run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Failed,
    NotFound,
    LoadError,
}

/// Result of a validation run, ready for human or JSON output.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    pub status: Status,
    /// The document that was validated (absent when none was found).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Candidate paths tried, in order (only for `NotFound`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tried: Vec<PathBuf>,
    /// Underlying load error text (only for `LoadError`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Rule violations (only for `Failed`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Process exit code for this report.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self.status {
            Status::Success => 0,
            Status::NotFound | Status::LoadError => 2,
            Status::Failed => 3,
        }
    }

    fn empty(status: Status) -> Self {
        Self {
            status,
            file: None,
            tried: Vec::new(),
            error: None,
            violations: Vec::new(),
        }
    }
}

impl From<Result<PathBuf, SpecError>> for ValidationReport {
    fn from(result: Result<PathBuf, SpecError>) -> Self {
        match result {
            Ok(path) => Self {
                file: Some(path),
                ..Self::empty(Status::Success)
            },
            Err(SpecError::NotFound { tried }) => Self {
                tried,
                ..Self::empty(Status::NotFound)
            },
            Err(SpecError::Load { path, message }) => Self {
                file: Some(path),
                error: Some(message),
                ..Self::empty(Status::LoadError)
            },
            Err(SpecError::Invalid { path, violations }) => Self {
                file: Some(path),
                violations: violations.into(),
                ..Self::empty(Status::Failed)
            },
        }
    }
}
