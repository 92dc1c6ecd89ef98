//! OpenAPI document validation.
//!
//! Two passes, in order:
//! - `schema`: structural validation against the embedded meta-schema for
//!   the document's OpenAPI version
//! - `semantic`: rules a JSON Schema cannot express (reference resolution,
//!   unique operation ids, path template parameters)
//!
//! The semantic pass only runs on structurally valid documents.

mod schema;
mod semantic;

use std::fmt;

use serde_json::{Map, Value};

use crate::error::Violations;
use crate::load::SpecDocument;

/// Validates a parsed OpenAPI document.
pub trait ValidateSpec {
    /// # Errors
    ///
    /// Returns every violation found if the document is not valid.
    fn validate(&self, document: &SpecDocument) -> Result<(), Violations>;
}

/// Supported OpenAPI versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OpenApiVersion {
    V3_0,
    V3_1,
}

impl fmt::Display for OpenApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3_0 => f.write_str("3.0"),
            Self::V3_1 => f.write_str("3.1"),
        }
    }
}

/// Validator for OpenAPI 3.0.x and 3.1.x documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiValidator;

impl ValidateSpec for OpenApiValidator {
    fn validate(&self, document: &SpecDocument) -> Result<(), Violations> {
        let root = document.root();
        let Some(object) = root.as_object() else {
            return Err(Violations::single(
                "",
                format!("document root must be a mapping, found {}", kind_of(root)),
            ));
        };

        let version = detect_version(object)?;
        tracing::debug!(%version, "detected OpenAPI version");

        schema::check_structure(version, root)?;
        semantic::check(root)
    }
}

fn detect_version(object: &Map<String, Value>) -> Result<OpenApiVersion, Violations> {
    match object.get("openapi") {
        Some(Value::String(v)) if v.starts_with("3.0.") => Ok(OpenApiVersion::V3_0),
        Some(Value::String(v)) if v.starts_with("3.1.") => Ok(OpenApiVersion::V3_1),
        Some(Value::String(v)) => Err(Violations::single(
            "/openapi",
            format!("unsupported OpenAPI version '{v}' (expected 3.0.x or 3.1.x)"),
        )),
        Some(other) => Err(Violations::single(
            "/openapi",
            format!("'openapi' must be a string, found {}", kind_of(other)),
        )),
        None if object.contains_key("swagger") => Err(Violations::single(
            "/swagger",
            "Swagger 2.0 documents are not supported; convert the document to OpenAPI 3.x",
        )),
        None => Err(Violations::single("", "'openapi' is a required property")),
    }
}

/// Short name of a JSON value's type, for messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
