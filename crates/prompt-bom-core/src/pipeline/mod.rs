//! Manifest validation pipeline.
//!
//! Raw manifest bytes go through ordered stages:
//! - parse: YAML/JSON bytes -> generic JSON value (fatal on failure)
//! - schema: conformance via a [`SchemaValidator`] collaborator
//! - semantic: id uniqueness, strict versions, dependency acyclicity
//! - integrity (optional): recompute component fingerprints
//!
//! Stages after parsing never stop at the first problem. They push
//! [`Violation`] records into the shared [`ValidationContext`] and the final
//! [`ValidationReport`] lists them in discovery order, so the first line is
//! always the most structural one.
//!
//! The core crate does not do filesystem I/O. Callers read the manifest and
//! pass bytes in; component bodies come through a [`ContentSource`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::assemble::ContentSource;
use crate::config::LimitsConfig;
use crate::errors::{BomError, BomResult};

pub mod parse;
pub mod schema;
pub mod stages;

pub use schema::{JsonSchemaValidator, SchemaValidator, SchemaViolation};
pub use stages::{IntegrityStage, SchemaStage, SemanticStage};

/// Classification of a single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    ParseError,
    SchemaViolation,
    InvalidVersion,
    #[serde(rename = "DuplicateComponentID")]
    DuplicateComponentId,
    DependencyCycle,
    HashMismatch,
    ComponentNotFound,
}

/// One reason a manifest fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Manifest label, usually its path.
    pub source: String,
    /// Dotted field path the violation points at.
    pub path: String,
    /// Human-readable detail; already names the offending field or id.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}: {}", self.source, self.message)
    }
}

/// State shared by all stages of one run.
pub struct ValidationContext {
    source: String,
    document: Value,
    violations: Vec<Violation>,
}

impl ValidationContext {
    pub fn new(source: impl Into<String>, document: Value) -> Self {
        Self {
            source: source.into(),
            document,
            violations: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn push(&mut self, kind: ViolationKind, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            kind,
            source: self.source.clone(),
            path: path.into(),
            message: message.into(),
        });
    }

    fn into_report(self) -> ValidationReport {
        ValidationReport {
            source: self.source,
            violations: self.violations,
        }
    }
}

/// A validation stage. Stages must not stop on document problems; they record
/// violations and return `Ok`. `Err` is reserved for collaborator failures.
pub trait Stage {
    fn id(&self) -> &str;
    fn run(&self, ctx: &mut ValidationContext) -> BomResult<()>;
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// Rendered violation lines, in discovery order.
    pub fn lines(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> BomResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(BomError::InvalidManifest {
                source_name: self.source,
                count: self.violations.len(),
            })
        }
    }
}

/// An ordered list of stages run after parsing.
pub struct ValidationPipeline<'a> {
    limits: LimitsConfig,
    stages: Vec<Box<dyn Stage + 'a>>,
}

impl<'a> ValidationPipeline<'a> {
    /// A pipeline with no stages beyond parsing.
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            limits,
            stages: Vec::new(),
        }
    }

    /// Schema conformance followed by semantic checks.
    pub fn standard(
        schema: &'a Value,
        validator: &'a dyn SchemaValidator,
        limits: LimitsConfig,
    ) -> Self {
        let mut p = Self::new(limits);
        p.push_stage(SchemaStage::new(schema, validator))
            .push_stage(SemanticStage);
        p
    }

    pub fn push_stage<S: Stage + 'a>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append the fingerprint integrity check.
    pub fn with_integrity(mut self, content: &'a dyn ContentSource) -> Self {
        self.push_stage(IntegrityStage::new(content));
        self
    }

    /// Run every stage over `raw` and return the report.
    ///
    /// A parse failure yields a report with exactly one `ParseError`.
    pub fn run(&self, source: &str, raw: &[u8]) -> BomResult<ValidationReport> {
        let document = match parse::parse_manifest_value(raw, &self.limits) {
            Ok(v) => v,
            Err(BomError::Parse(msg)) => {
                debug!(source, "manifest failed to parse");
                let mut ctx = ValidationContext::new(source, Value::Null);
                ctx.push(ViolationKind::ParseError, "(root)", format!("parse error: {msg}"));
                return Ok(ctx.into_report());
            }
            Err(e) => return Err(e),
        };

        let mut ctx = ValidationContext::new(source, document);
        for st in &self.stages {
            let before = ctx.violations().len();
            st.run(&mut ctx)?;
            debug!(
                stage = st.id(),
                found = ctx.violations().len() - before,
                "validation stage completed"
            );
        }

        Ok(ctx.into_report())
    }
}

/// Validate a manifest with the standard stages.
pub fn validate_manifest(
    source: &str,
    raw: &[u8],
    schema: &Value,
    validator: &dyn SchemaValidator,
    limits: &LimitsConfig,
) -> BomResult<ValidationReport> {
    ValidationPipeline::standard(schema, validator, limits.clone()).run(source, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determinism::hashing::compute_fingerprint;
    use crate::model::manifest::TEMPLATE_YAML;
    use std::collections::BTreeMap;

    /// Reports a fixed list regardless of input.
    struct FixedValidator(Vec<SchemaViolation>);

    impl SchemaValidator for FixedValidator {
        fn validate(&self, _document: &Value, _schema: &Value) -> BomResult<Vec<SchemaViolation>> {
            Ok(self.0.clone())
        }
    }

    struct FailingValidator;

    impl SchemaValidator for FailingValidator {
        fn validate(&self, _document: &Value, _schema: &Value) -> BomResult<Vec<SchemaViolation>> {
            Err(BomError::schema("engine unavailable"))
        }
    }

    fn run(raw: &str) -> ValidationReport {
        let schema = schema::default_schema().unwrap();
        validate_manifest("m.yaml", raw.as_bytes(), &schema, &JsonSchemaValidator, &LimitsConfig::default())
            .unwrap()
    }

    fn manifest_with(components: &str) -> String {
        TEMPLATE_YAML.replace("components: []\n", components)
    }

    fn component(id: &str, version: &str, deps: &[&str]) -> String {
        let mut s = format!(
            "  - id: \"{id}\"\n    version: \"{version}\"\n    hash: \"{}\"\n    metadata:\n      owner: \"team\"\n",
            compute_fingerprint(id.as_bytes())
        );
        if !deps.is_empty() {
            let list: Vec<String> = deps.iter().map(|d| format!("\"{d}\"")).collect();
            s.push_str(&format!("    depends_on: [{}]\n", list.join(", ")));
        }
        s
    }

    #[test]
    fn template_is_valid() {
        let r = run(TEMPLATE_YAML);
        assert!(r.is_valid(), "{:?}", r.lines());
        assert!(r.violations.is_empty());
        r.into_result().unwrap();
    }

    #[test]
    fn missing_name_reported() {
        let r = run(&TEMPLATE_YAML.replace("  name: \"my-bom\"\n", ""));
        assert!(!r.is_valid());
        assert_eq!(r.lines(), vec!["Error: m.yaml: bom.name is required".to_string()]);
        assert!(r.into_result().is_err());
    }

    #[test]
    fn parse_error_is_single_and_fatal() {
        let r = run("bom: [unclosed\n");
        assert_eq!(r.violations.len(), 1);
        assert_eq!(r.violations[0].kind, ViolationKind::ParseError);
        assert!(r.lines()[0].starts_with("Error: m.yaml: parse error:"));
    }

    #[test]
    fn duplicate_ids_reported() {
        let body = format!(
            "components:\n{}{}{}",
            component("A", "1.0.0", &[]),
            component("B", "1.0.0", &[]),
            component("A", "1.0.0", &[])
        );
        let r = run(&manifest_with(&body));
        assert_eq!(r.violations.len(), 1);
        let v = &r.violations[0];
        assert_eq!(v.kind, ViolationKind::DuplicateComponentId);
        assert_eq!(v.path, "components.2.id");
        assert!(v.message.contains("`A`"));
    }

    #[test]
    fn invalid_version_reported_by_semantic_stage() {
        // Passes the schema pattern, fails strict parsing.
        let body = format!("components:\n{}", component("A", "1.0.0-a..b", &[]));
        let r = run(&manifest_with(&body));
        assert!(r.has(ViolationKind::InvalidVersion));
        assert_eq!(r.violations[0].path, "components.0.version");
    }

    #[test]
    fn cycle_reported_with_path() {
        let body = format!(
            "components:\n{}{}{}",
            component("A", "1.0.0", &["B"]),
            component("B", "1.0.0", &["C"]),
            component("C", "1.0.0", &["A"])
        );
        let r = run(&manifest_with(&body));
        assert_eq!(r.violations.len(), 1);
        assert_eq!(r.violations[0].kind, ViolationKind::DependencyCycle);
        assert!(r.violations[0].message.contains("A -> B -> C -> A"));
    }

    #[test]
    fn acyclic_dependencies_pass() {
        let body = format!(
            "components:\n{}{}",
            component("A", "1.0.0", &["B"]),
            component("B", "1.0.0", &[])
        );
        assert!(run(&manifest_with(&body)).is_valid());
    }

    #[test]
    fn schema_violations_come_before_semantic_ones() {
        let body = format!(
            "components:\n{}{}",
            component("A", "1.0.0", &[]),
            component("A", "1.0.0", &[])
        );
        let raw = manifest_with(&body).replace("    license: \"MIT\"\n", "");
        let r = run(&raw);
        let kinds: Vec<ViolationKind> = r.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            [ViolationKind::SchemaViolation, ViolationKind::DuplicateComponentId]
        );
        assert_eq!(r.violations[0].message, "bom.metadata.license is required");
    }

    #[test]
    fn type_error_does_not_hide_semantic_checks() {
        let first = component("A", "1.0.0", &["A"]).replace(
            "    metadata:\n",
            "    description: 5\n    metadata:\n",
        );
        let body = format!("components:\n{first}{}", component("A", "1.0.0", &[]));
        let r = run(&manifest_with(&body));

        let kinds: Vec<ViolationKind> = r.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            [
                ViolationKind::SchemaViolation,
                ViolationKind::DuplicateComponentId,
                ViolationKind::DependencyCycle,
            ]
        );
        assert_eq!(r.violations[0].path, "components.0.description");
        assert_eq!(r.violations[1].path, "components.1.id");
        assert!(r.violations[2].message.contains("A -> A"));
    }

    #[test]
    fn both_dependency_keys_rejected_and_still_checked() {
        let c = component("A", "1.0.0", &["A"]) + "    dependsOn: [\"B\"]\n";
        let r = run(&manifest_with(&format!("components:\n{c}")));

        let schema_hit = r
            .violations
            .iter()
            .find(|v| v.kind == ViolationKind::SchemaViolation)
            .unwrap();
        assert_eq!(schema_hit.path, "components.0");
        assert!(r.has(ViolationKind::DependencyCycle));
        assert!(!r.lines().iter().any(|l| l.contains("parse error")));
    }

    #[test]
    fn camel_case_dependencies_feed_cycle_check() {
        let a = component("A", "1.0.0", &[]) + "    dependsOn: [\"B\"]\n";
        let b = component("B", "1.0.0", &["A"]);
        let r = run(&manifest_with(&format!("components:\n{a}{b}")));
        assert_eq!(r.violations.len(), 1);
        assert!(r.violations[0].message.contains("A -> B -> A"));
    }

    #[test]
    fn unsupported_schema_version_reported_once() {
        let r = run(&TEMPLATE_YAML.replace("schema_version: \"1.0.0\"", "schema_version: \"2.0.0\""));
        assert_eq!(r.violations.len(), 1, "{:?}", r.lines());
        assert_eq!(r.violations[0].kind, ViolationKind::SchemaViolation);
        assert_eq!(r.violations[0].path, "schema_version");
    }

    #[test]
    fn custom_validator_violations_are_rendered() {
        let fixed = FixedValidator(vec![SchemaViolation::new("bom.model", "must be a string")]);
        let schema = Value::Null;
        let r = ValidationPipeline::standard(&schema, &fixed, LimitsConfig::default())
            .run("x.yaml", TEMPLATE_YAML.as_bytes())
            .unwrap();
        assert_eq!(r.lines(), vec!["Error: x.yaml: bom.model: must be a string".to_string()]);
    }

    #[test]
    fn collaborator_failure_is_an_error() {
        let schema = Value::Null;
        let err = ValidationPipeline::standard(&schema, &FailingValidator, LimitsConfig::default())
            .run("x.yaml", TEMPLATE_YAML.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("engine unavailable"));
    }

    #[test]
    fn integrity_stage_detects_drift() {
        let body = format!(
            "components:\n{}{}",
            component("A", "1.0.0", &[]),
            component("B", "1.0.0", &[])
        );
        let mut content: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        content.insert("A".to_string(), b"A".to_vec());
        content.insert("B".to_string(), b"B changed".to_vec());

        let schema = schema::default_schema().unwrap();
        let r = ValidationPipeline::standard(&schema, &JsonSchemaValidator, LimitsConfig::default())
            .with_integrity(&content)
            .run("m.yaml", manifest_with(&body).as_bytes())
            .unwrap();

        assert_eq!(r.violations.len(), 1);
        assert_eq!(r.violations[0].kind, ViolationKind::HashMismatch);
        assert_eq!(r.violations[0].path, "components.1.hash");
        assert!(r.violations[0].message.contains("`B`"));
    }

    #[test]
    fn integrity_stage_reports_missing_body() {
        let body = format!("components:\n{}", component("A", "1.0.0", &[]));
        let content: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let schema = schema::default_schema().unwrap();
        let r = ValidationPipeline::standard(&schema, &JsonSchemaValidator, LimitsConfig::default())
            .with_integrity(&content)
            .run("m.yaml", manifest_with(&body).as_bytes())
            .unwrap();
        assert!(r.has(ViolationKind::ComponentNotFound));
    }
}
