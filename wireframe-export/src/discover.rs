//! Wireframe discovery and output naming.

use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::ExportError;

/// Find the files directly inside `source_dir` whose names match `pattern`.
///
/// Only one directory level is scanned. Results are sorted so runs are
/// reproducible. A missing source directory yields no files.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob or the directory cannot be
/// read.
pub fn find_wireframes(source_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ExportError> {
    let matcher = Pattern::new(pattern).map_err(|e| ExportError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })?;

    if !source_dir.is_dir() {
        tracing::warn!(
            dir = %source_dir.display(),
            "source directory does not exist; nothing to export"
        );
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry_result in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry_result.map_err(|walk_err| ExportError::Io {
            action: "failed to scan",
            path: walk_err
                .path()
                .map_or_else(|| source_dir.to_path_buf(), Path::to_path_buf),
            source: io::Error::from(walk_err),
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if matcher.matches(&name) {
            tracing::debug!(file = %path.display(), "found wireframe");
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// PNG path for `svg`: the input name with its extension replaced by `.png`,
/// placed in `output_dir`.
#[must_use]
pub fn output_path_for(svg: &Path, output_dir: &Path) -> PathBuf {
    let stem = svg.file_stem().unwrap_or(svg.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".png");
    output_dir.join(name)
}
