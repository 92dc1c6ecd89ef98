//! Structural validation against the embedded OpenAPI meta-schemas.
//!
//! The schemas are the published OpenAPI Initiative documents:
//! `https://spec.openapis.org/oas/3.0/schema/2021-09-28` (draft-04) and
//! `https://spec.openapis.org/oas/3.1/schema/2022-10-07` (2020-12). The 3.1
//! document checks Schema Objects only as objects or booleans.

use serde_json::Value;

use super::OpenApiVersion;
use crate::error::{Violation, Violations};

const OPENAPI_3_0_SCHEMA: &str = include_str!("../../schemas/openapi-3.0.json");
const OPENAPI_3_1_SCHEMA: &str = include_str!("../../schemas/openapi-3.1.json");

fn meta_schema_source(version: OpenApiVersion) -> &'static str {
    match version {
        OpenApiVersion::V3_0 => OPENAPI_3_0_SCHEMA,
        OpenApiVersion::V3_1 => OPENAPI_3_1_SCHEMA,
    }
}

/// Validate `document` against the meta-schema for `version`.
///
/// A meta-schema that fails to load or compile is reported as a violation so
/// the caller still gets a failed validation rather than a panic.
pub fn check_structure(version: OpenApiVersion, document: &Value) -> Result<(), Violations> {
    let schema: Value = serde_json::from_str(meta_schema_source(version)).map_err(|e| {
        Violations::single("", format!("failed to load OpenAPI {version} meta-schema: {e}"))
    })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| {
        Violations::single("", format!("failed to compile OpenAPI {version} meta-schema: {e}"))
    })?;

    let violations: Vec<Violation> = validator
        .iter_errors(document)
        .map(|error| Violation::new("", error.to_string()))
        .collect();

    if !violations.is_empty() {
        tracing::debug!(%version, count = violations.len(), "document failed structural validation");
    }
    Violations::into_result(violations)
}
