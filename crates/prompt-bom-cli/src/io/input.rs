use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use prompt_bom_core::pipeline::schema::default_schema;
use serde_json::Value;

/// Raw manifest bytes. Parsing is left to the validation pipeline so syntax
/// errors are reported as violations.
pub fn read_manifest(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading manifest {}", path.display()))
}

/// The schema override at `path`, or the embedded schema.
pub fn load_schema(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(default_schema()?);
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("invalid schema json in {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_schema_is_default() {
        let schema = load_schema(None).unwrap();
        assert_eq!(schema["type"], "object");
    }

    #[test]
    fn schema_override_must_be_json() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("s.json");
        fs::write(&p, "not json").unwrap();
        let err = load_schema(Some(&p)).unwrap_err();
        assert!(err.to_string().contains("s.json"));
    }

    #[test]
    fn missing_manifest_names_path() {
        let err = read_manifest(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.yaml"));
    }
}
