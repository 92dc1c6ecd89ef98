//! Configuration for a wireframe export run.

use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// File name pattern selecting the wireframes to export.
pub const DEFAULT_PATTERN: &str = "*_lowfi.svg";

/// Target raster width in pixels. The height follows the SVG aspect ratio.
pub const DEFAULT_WIDTH: u32 = 1600;

/// Where wireframes are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExportConfig {
    /// Directory scanned (non-recursively) for wireframes.
    pub source_dir: PathBuf,
    /// Directory receiving the PNG files. Created with its parents if absent.
    pub output_dir: PathBuf,
    /// Glob matched against file names in `source_dir`.
    pub pattern: String,
    /// Raster width in pixels.
    pub width: u32,
}

impl ExportConfig {
    /// Standard layout under a project root:
    /// `<root>/design/wireframes` in, `<root>/design/wireframes/png` out.
    #[must_use]
    pub fn for_project_root(root: &Path) -> Self {
        let source_dir = root.join("design").join("wireframes");
        let output_dir = source_dir.join("png");
        Self {
            source_dir,
            output_dir,
            pattern: DEFAULT_PATTERN.to_owned(),
            width: DEFAULT_WIDTH,
        }
    }
}

/// Project root used when none is given on the command line.
///
/// The tool is installed one level below the root (for example
/// `<root>/scripts/export-wireframes`), so the root is the parent of the
/// directory holding the running executable. Symlinks are resolved first.
///
/// # Errors
///
/// Returns [`ExportError::ProjectRoot`] if the executable path cannot be
/// determined or has no grandparent directory.
pub fn default_project_root() -> Result<PathBuf, ExportError> {
    let exe = std::env::current_exe().map_err(|e| ExportError::ProjectRoot {
        reason: format!("cannot locate the running executable: {e}"),
    })?;
    let exe = exe.canonicalize().unwrap_or(exe);
    project_root_for_exe(&exe).ok_or_else(|| ExportError::ProjectRoot {
        reason: format!("'{}' has no parent directory above it", exe.display()),
    })
}

/// Project root for an executable installed at `exe`: two levels up.
#[must_use]
pub fn project_root_for_exe(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent().map(Path::to_path_buf)
}
