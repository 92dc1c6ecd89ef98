//! Error types for wireframe export.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::raster::RasterizeError;

/// Every way an export run can stop early.
///
/// The run is fail-fast: the first error ends it, and the variant decides the
/// process exit code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The rasterization backend could not be loaded at startup.
    #[error("rasterization backend '{backend}' is unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    /// A conversion failed because the native rendering runtime is absent.
    #[error("failed to export {}: native rendering runtime missing: {message}", file.display())]
    RuntimeMissing { file: PathBuf, message: String },

    /// Any other per-file conversion failure.
    #[error("failed to export {}: {message}", file.display())]
    Conversion { file: PathBuf, message: String },

    /// The wireframe file name pattern is not a valid glob.
    #[error("invalid wireframe pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The default project root could not be derived from the executable's location.
    #[error("cannot determine the project root: {reason}")]
    ProjectRoot { reason: String },

    /// Filesystem failure outside of a conversion (output dir, directory scan).
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the progress report failed.
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

impl ExportError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BackendUnavailable { .. } => 2,
            Self::RuntimeMissing { .. } => 3,
            Self::Conversion { .. } => 4,
            Self::InvalidPattern { .. }
            | Self::ProjectRoot { .. }
            | Self::Io { .. }
            | Self::Report(_) => 1,
        }
    }

    /// Attach the failing `file` to a backend error, keeping its kind.
    #[must_use]
    pub fn from_rasterize(file: &Path, err: RasterizeError) -> Self {
        match err {
            RasterizeError::RuntimeMissing(message) => Self::RuntimeMissing {
                file: file.to_owned(),
                message,
            },
            RasterizeError::Failed(message) => Self::Conversion {
                file: file.to_owned(),
                message,
            },
        }
    }
}
