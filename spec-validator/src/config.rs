//! Where to look for the OpenAPI document.

use std::path::{Path, PathBuf};

/// File name of the project's OpenAPI document.
pub const SPEC_FILE_NAME: &str = "mindgarden.yaml";

/// Ordered list of candidate paths; the first that exists is used.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SearchConfig {
    pub candidates: Vec<PathBuf>,
}

impl SearchConfig {
    /// The standard search list, relative to the working directory `cwd`:
    ///
    /// 1. `<cwd>/openapi/mindgarden.yaml`
    /// 2. `<cwd>/../openapi/mindgarden.yaml`
    /// 3. `C:\openapi\mindgarden.yaml`
    /// 4. `/openapi/mindgarden.yaml`
    #[must_use]
    pub fn default_for(cwd: &Path) -> Self {
        Self {
            candidates: vec![
                cwd.join("openapi").join(SPEC_FILE_NAME),
                cwd.join("..").join("openapi").join(SPEC_FILE_NAME),
                PathBuf::from(format!("C:\\openapi\\{SPEC_FILE_NAME}")),
                PathBuf::from(format!("/openapi/{SPEC_FILE_NAME}")),
            ],
        }
    }

    /// An explicit search list, replacing the defaults.
    #[must_use]
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }
}
