//! # spec-validator
//!
//! Locates the project's OpenAPI document among a list of candidate paths,
//! parses it as YAML, and validates it against the OpenAPI meta-schema plus a
//! small set of semantic rules.
//!
//! Validation itself sits behind the [`ValidateSpec`] trait so the locate /
//! load / report pipeline can be exercised with any implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spec_validator::{OpenApiValidator, SearchConfig, ValidationReport, validate_openapi};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let search = SearchConfig::default_for(&cwd);
//! let report = ValidationReport::from(validate_openapi(&search, &OpenApiValidator));
//! println!("exit code: {}", report.exit_code());
//! ```

mod config;
mod error;
mod load;
mod locate;
pub mod output;
mod report;
mod validate;

pub use config::{SPEC_FILE_NAME, SearchConfig};
pub use error::{SpecError, Violation, Violations};
pub use load::{MAX_SPEC_SIZE, SpecDocument, load_spec, parse_spec};
pub use locate::locate_spec;
pub use report::{Status, ValidationReport};
pub use validate::{OpenApiValidator, OpenApiVersion, ValidateSpec};

use std::path::PathBuf;

/// Locate, load and validate the OpenAPI document.
///
/// Returns the path of the validated document.
///
/// # Errors
///
/// - [`SpecError::NotFound`] if no candidate path exists
/// - [`SpecError::Load`] if the file cannot be read or parsed as YAML
/// - [`SpecError::Invalid`] if `validator` rejects the document
pub fn validate_openapi(
    search: &SearchConfig,
    validator: &dyn ValidateSpec,
) -> Result<PathBuf, SpecError> {
    let path = locate_spec(search)?;
    tracing::info!(file = %path.display(), "validating OpenAPI document");

    let document = load_spec(&path)?;
    validator
        .validate(&document)
        .map_err(|violations| SpecError::Invalid {
            path: path.clone(),
            violations,
        })?;

    Ok(path)
}
