//! Schema conformance collaborator.
//!
//! The pipeline treats JSON Schema validation as a black box: a document and
//! a schema go in, an ordered list of violations comes out. The default
//! implementation is backed by the `jsonschema` crate; tests and embedders
//! can supply their own [`SchemaValidator`].

use jsonschema::error::ValidationErrorKind;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{BomError, BomResult};

/// JSON Schema shipped with the crate, used when no override is configured.
pub const DEFAULT_SCHEMA_JSON: &str = include_str!("../../schema/prompt.bom.schema.json");

/// Parse the embedded schema document.
pub fn default_schema() -> BomResult<Value> {
    serde_json::from_str(DEFAULT_SCHEMA_JSON)
        .map_err(|e| BomError::schema(format!("embedded schema is not valid JSON: {e}")))
}

/// One schema-level problem: where it is and what is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// Dotted field path (`bom.metadata.owner`, `components.0.hash`), or `(root)`.
    pub path: String,
    pub reason: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// `<path>: <reason>`, or `<path> is required` for missing fields.
    pub fn render(&self) -> String {
        if self.reason == REQUIRED {
            format!("{} {}", self.path, REQUIRED)
        } else {
            format!("{}: {}", self.path, self.reason)
        }
    }
}

const REQUIRED: &str = "is required";

/// Structural validation against a schema document.
pub trait SchemaValidator {
    /// Validate `document` against `schema`.
    ///
    /// An `Err` means the validator could not run at all (e.g. the schema is
    /// itself invalid); document problems are returned as violations.
    fn validate(&self, document: &Value, schema: &Value) -> BomResult<Vec<SchemaViolation>>;
}

/// [`SchemaValidator`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, document: &Value, schema: &Value) -> BomResult<Vec<SchemaViolation>> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| BomError::schema(format!("invalid schema document: {e}")))?;

        let violations = validator
            .iter_errors(document)
            .map(|error| {
                let path = pointer_to_dotted(&error.instance_path.to_string());
                match &error.kind {
                    ValidationErrorKind::Required { property } => {
                        let field = property
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| property.to_string());
                        let full = if path == ROOT {
                            field
                        } else {
                            format!("{path}.{field}")
                        };
                        SchemaViolation::new(full, REQUIRED)
                    }
                    _ => SchemaViolation::new(path, error.to_string()),
                }
            })
            .collect();

        Ok(violations)
    }
}

const ROOT: &str = "(root)";

/// `/components/0/hash` -> `components.0.hash`; the empty pointer is `(root)`.
pub fn pointer_to_dotted(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        return ROOT.to_string();
    }
    trimmed
        .split('/')
        .map(|seg| seg.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
