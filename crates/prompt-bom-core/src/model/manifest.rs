//! Manifest document shape.
//!
//! This is the loosely typed mirror of a `*.bom.yaml` file. Every field
//! defaults when absent: reporting what is missing is the job of the schema
//! and semantic stages, not of serde. Use [`crate::model::Bom::from_manifest`]
//! to obtain checked values.

use serde::{Deserialize, Serialize};

use crate::version::SchemaVersion;

/// Template written by `bom init`.
pub const TEMPLATE_YAML: &str = r#"schema_version: "1.0.0"
bom:
  name: "my-bom"
  version: "0.1.0"
  model: "gpt-4o-2025-05"
  description: "BOM description"
  metadata:
    owner: "your-team"
    license: "MIT"
components: []
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestDocument {
    pub schema_version: String,
    pub bom: BomSection,
    pub components: Vec<ComponentEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BomSection {
    pub name: String,
    pub version: String,
    pub model: String,
    pub description: String,
    pub metadata: MetadataSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSection {
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license: String,
}

impl MetadataSection {
    pub fn owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            license: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentEntry {
    pub id: String,
    pub version: String,
    pub hash: String,
    pub description: String,
    pub metadata: MetadataSection,
    /// Either spelling; the schema rejects a component carrying both.
    #[serde(alias = "dependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ManifestDocument {
    /// The document `bom init` writes.
    pub fn template() -> Self {
        Self {
            schema_version: SchemaVersion::V1.as_str().to_string(),
            bom: BomSection {
                name: "my-bom".to_string(),
                version: "0.1.0".to_string(),
                model: "gpt-4o-2025-05".to_string(),
                description: "BOM description".to_string(),
                metadata: MetadataSection {
                    owner: "your-team".to_string(),
                    license: "MIT".to_string(),
                },
            },
            components: Vec::new(),
        }
    }

    /// True if any component declares a dependency.
    pub fn has_dependency_edges(&self) -> bool {
        self.components.iter().any(|c| !c.depends_on.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_yaml_matches_template_document() {
        let doc: ManifestDocument = serde_yaml::from_str(TEMPLATE_YAML).unwrap();
        assert_eq!(doc, ManifestDocument::template());
        assert!(!doc.has_dependency_edges());
    }

    #[test]
    fn missing_fields_default() {
        let doc: ManifestDocument = serde_yaml::from_str("bom:\n  version: \"1.0.0\"\n").unwrap();
        assert_eq!(doc.bom.name, "");
        assert_eq!(doc.bom.version, "1.0.0");
        assert!(doc.components.is_empty());
    }

    #[test]
    fn depends_on_accepts_camel_case_alias() {
        let yaml = "components:\n  - id: a\n    dependsOn: [b]\n  - id: b\n    depends_on: [c]\n";
        let doc: ManifestDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.components[0].depends_on, vec!["b".to_string()]);
        assert_eq!(doc.components[1].depends_on, vec!["c".to_string()]);
        assert!(doc.has_dependency_edges());
    }
}
