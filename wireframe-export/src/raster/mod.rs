//! Rasterization backends.
//!
//! The export pipeline only sees the [`Rasterize`] trait. Everything that knows
//! how an SVG becomes pixels lives behind it:
//! - `resvg`: in-process renderer (default)
//! - `rsvg-convert`: external program, for environments that standardise on
//!   the cairo/librsvg toolchain

mod command;
mod svg;

pub use command::CommandRasterizer;
pub use svg::ResvgRasterizer;

use std::path::Path;

use thiserror::Error;

use crate::error::ExportError;

/// Lower-cased fragments that identify a missing native rendering runtime in
/// backend error text.
pub const MISSING_RUNTIME_MARKERS: &[&str] = &[
    "no library called",
    "cannot load library",
    "libcairo-2.dll",
    "libcairo.so",
    "libcairo.2.dylib",
    "error while loading shared libraries",
    "library not loaded",
];

/// Converts one SVG file into a PNG file.
pub trait Rasterize {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Render `input` to `output` at `width` pixels wide, keeping the aspect
    /// ratio. An existing `output` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`RasterizeError::RuntimeMissing`] when the backend's native
    /// runtime is absent, [`RasterizeError::Failed`] for anything else.
    fn rasterize(&self, input: &Path, output: &Path, width: u32) -> Result<(), RasterizeError>;
}

/// Failure reported by a backend for a single file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RasterizeError {
    /// A native library the backend needs could not be loaded.
    #[error("{0}")]
    RuntimeMissing(String),
    /// Any other conversion failure.
    #[error("{0}")]
    Failed(String),
}

impl RasterizeError {
    /// Classify free-form backend error text.
    ///
    /// Backends call this only when they have no structured signal of their own.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if looks_like_missing_runtime(&message) {
            Self::RuntimeMissing(message)
        } else {
            Self::Failed(message)
        }
    }

    /// The underlying error text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::RuntimeMissing(m) | Self::Failed(m) => m,
        }
    }
}

/// Case-insensitive check of `message` against [`MISSING_RUNTIME_MARKERS`].
#[must_use]
pub fn looks_like_missing_runtime(message: &str) -> bool {
    let lower = message.to_lowercase();
    MISSING_RUNTIME_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Which rasterization backend to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum BackendKind {
    #[default]
    Resvg,
    RsvgConvert,
}

impl BackendKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resvg => "resvg",
            Self::RsvgConvert => "rsvg-convert",
        }
    }
}

/// Load a backend, checking that it is usable before any file is touched.
///
/// `program` overrides the executable for external backends and is ignored by
/// `resvg`.
///
/// # Errors
///
/// Returns [`ExportError::BackendUnavailable`] if the backend cannot be loaded.
pub fn load_backend(
    kind: BackendKind,
    program: Option<&Path>,
) -> Result<Box<dyn Rasterize>, ExportError> {
    match kind {
        BackendKind::Resvg => Ok(Box::new(ResvgRasterizer::new())),
        BackendKind::RsvgConvert => {
            let program = program.unwrap_or(Path::new(CommandRasterizer::DEFAULT_PROGRAM));
            let rasterizer = CommandRasterizer::locate(program).map_err(|reason| {
                ExportError::BackendUnavailable {
                    backend: kind.as_str().to_owned(),
                    reason,
                }
            })?;
            Ok(Box::new(rasterizer))
        }
    }
}
