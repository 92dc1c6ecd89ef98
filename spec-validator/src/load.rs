//! Reading and parsing the OpenAPI document.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SpecError;

/// Largest document accepted, in bytes (10 MiB).
pub const MAX_SPEC_SIZE: u64 = 10_485_760;

/// A parsed OpenAPI document and the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    path: PathBuf,
    root: Value,
}

impl SpecDocument {
    #[must_use]
    pub fn new(path: PathBuf, root: Value) -> Self {
        Self { path, root }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document tree. An empty file parses to `Value::Null`.
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`SpecError::Load`] if the file cannot be read, is larger than
/// [`MAX_SPEC_SIZE`], is not UTF-8, or is not valid YAML.
pub fn load_spec(path: &Path) -> Result<SpecDocument, SpecError> {
    let content = read_bounded(path)?;
    parse_spec(&content, path)
}

/// Parse YAML (or JSON) text into a [`SpecDocument`] attributed to `path`.
///
/// # Errors
///
/// Returns [`SpecError::Load`] carrying the parser's message if the text is
/// not valid YAML.
pub fn parse_spec(content: &str, path: &Path) -> Result<SpecDocument, SpecError> {
    if content.trim().is_empty() {
        return Ok(SpecDocument::new(path.to_owned(), Value::Null));
    }
    let root: Value = serde_saphyr::from_str(content).map_err(|e| SpecError::Load {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    Ok(SpecDocument::new(path.to_owned(), root))
}

fn read_bounded(path: &Path) -> Result<String, SpecError> {
    let load_error = |message: String| SpecError::Load {
        path: path.to_owned(),
        message,
    };

    let file = std::fs::File::open(path)
        .map_err(|e| load_error(format!("Failed to open file: {e}")))?;

    // Read one byte past the limit to detect oversized files.
    let mut buffer = Vec::new();
    file.take(MAX_SPEC_SIZE + 1)
        .read_to_end(&mut buffer)
        .map_err(|e| load_error(format!("Failed to read file: {e}")))?;

    if buffer.len() as u64 > MAX_SPEC_SIZE {
        return Err(load_error(format!(
            "File exceeds maximum size of {MAX_SPEC_SIZE} bytes"
        )));
    }

    String::from_utf8(buffer).map_err(|_| load_error("File is not valid UTF-8".to_owned()))
}
