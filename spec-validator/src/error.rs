//! Error types for OpenAPI validation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A single rule the document breaks.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Violation {
    /// JSON pointer into the document (empty for document-level findings).
    pub location: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}

/// Every violation found in one validation pass. Never empty when returned
/// as an error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub fn single(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![Violation::new(location, message)])
    }

    /// `Ok(())` for an empty list, otherwise the list as an error.
    ///
    /// # Errors
    ///
    /// Returns `Err` when `violations` is not empty.
    pub fn into_result(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self(violations))
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl From<Violations> for Vec<Violation> {
    fn from(violations: Violations) -> Self {
        violations.0
    }
}

/// Why a validation run did not succeed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpecError {
    /// None of the candidate paths exists.
    #[error("OpenAPI file not found ({} location(s) tried)", tried.len())]
    NotFound { tried: Vec<PathBuf> },

    /// The file could not be read or is not valid YAML.
    #[error("failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// The document does not conform to the OpenAPI specification.
    #[error("{} is not a valid OpenAPI document:\n{violations}", path.display())]
    Invalid {
        path: PathBuf,
        violations: Violations,
    },
}

impl SpecError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } | Self::Load { .. } => 2,
            Self::Invalid { .. } => 3,
        }
    }
}
