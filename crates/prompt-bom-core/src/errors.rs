//! Error taxonomy for prompt-bom.
//!
//! Construction-time errors (versions, required fields, fingerprints) are
//! returned immediately by the fallible constructors in `crate::model`.
//! Validation problems are collected as `crate::pipeline::Violation` records
//! instead and only become a `BomError` when a report is turned into a result.

use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type BomResult<T> = Result<T, BomError>;

/// All failures surfaced by prompt-bom.
///
/// Every variant carries the offending identifier (field path, component id
/// or manifest source) so the message is actionable on its own.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BomError {
    /// The manifest could not be decoded at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// The schema collaborator itself failed (e.g. the schema document is invalid).
    #[error("schema error: {0}")]
    Schema(String),

    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },

    #[error("invalid version `{input}`: {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("invalid fingerprint `{input}`: expected sha256:<64 lowercase hex>")]
    InvalidFingerprint { input: String },

    #[error("duplicate component id `{id}`")]
    DuplicateComponentId { id: String },

    #[error("dependency cycle: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },

    /// The content source could not produce a component body.
    #[error("component `{id}` not found: {source}")]
    ComponentNotFound {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("hash mismatch for component `{id}`: declared {declared}, computed {computed}")]
    HashMismatch {
        id: String,
        declared: String,
        computed: String,
    },

    /// A validation report with violations was turned into an error.
    #[error("{source_name}: manifest is invalid ({count} violation(s))")]
    InvalidManifest { source_name: String, count: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BomError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Stable short code, used in JSON output and violation records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "ParseError",
            Self::Schema(_) => "SchemaError",
            Self::MissingRequiredField { .. } => "MissingRequiredField",
            Self::InvalidVersion { .. } => "InvalidVersion",
            Self::InvalidFingerprint { .. } => "InvalidFingerprint",
            Self::DuplicateComponentId { .. } => "DuplicateComponentID",
            Self::DependencyCycle { .. } => "DependencyCycle",
            Self::ComponentNotFound { .. } => "ComponentNotFound",
            Self::HashMismatch { .. } => "HashMismatch",
            Self::InvalidManifest { .. } => "InvalidManifest",
            Self::Config(_) => "ConfigError",
        }
    }
}
