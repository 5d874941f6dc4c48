//! Parsing helpers for manifest bytes.
//!
//! Manifests are YAML; since YAML is a superset of JSON, JSON manifests are
//! accepted too. Parsing goes to a generic `serde_json::Value` first so the
//! schema stage sees exactly what the file says, independent of the typed
//! model.
//!
//! Limits come from `LimitsConfig`, never from the environment.

use serde_json::Value;

use crate::config::LimitsConfig;
use crate::errors::{BomError, BomResult};
use crate::model::ManifestDocument;

/// Parse manifest bytes into a generic JSON value.
pub fn parse_manifest_value(bytes: &[u8], limits: &LimitsConfig) -> BomResult<Value> {
    if bytes.len() > limits.max_manifest_bytes {
        return Err(BomError::parse(format!(
            "manifest too large ({} bytes > limit {})",
            bytes.len(),
            limits.max_manifest_bytes
        )));
    }

    let text = std::str::from_utf8(bytes)
        .map_err(|e| BomError::parse(format!("manifest is not valid UTF-8: {e}")))?;

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| BomError::parse(e.to_string()))?;

    let value = serde_json::to_value(&yaml)
        .map_err(|e| BomError::parse(format!("manifest is not representable as JSON: {e}")))?;

    let count = value
        .get("components")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if count > limits.max_components {
        return Err(BomError::parse(format!(
            "too many components ({count} > limit {})",
            limits.max_components
        )));
    }

    Ok(value)
}

/// Decode a generic value into the manifest document shape.
pub fn manifest_from_value(value: Value) -> BomResult<ManifestDocument> {
    serde_json::from_value(value)
        .map_err(|e| BomError::parse(format!("manifest has an unexpected shape: {e}")))
}

/// Parse bytes straight into a [`ManifestDocument`].
pub fn parse_manifest(bytes: &[u8], limits: &LimitsConfig) -> BomResult<ManifestDocument> {
    manifest_from_value(parse_manifest_value(bytes, limits)?)
}
