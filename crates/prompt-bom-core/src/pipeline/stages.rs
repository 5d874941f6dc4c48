//! Built-in validation stages.
//!
//! None of these stop at the first problem: each records every violation it
//! finds and returns `Ok`. Only collaborator failures are errors.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::assemble::ContentSource;
use crate::determinism::hashing::compute_fingerprint;
use crate::errors::{BomError, BomResult};
use crate::graph;
use crate::pipeline::schema::SchemaValidator;
use crate::pipeline::{Stage, ValidationContext, ViolationKind};
use crate::version::BomVersion;

/// Stage: delegate structural checks to a [`SchemaValidator`].
pub struct SchemaStage<'a> {
    schema: &'a Value,
    validator: &'a dyn SchemaValidator,
}

impl<'a> SchemaStage<'a> {
    pub fn new(schema: &'a Value, validator: &'a dyn SchemaValidator) -> Self {
        Self { schema, validator }
    }
}

impl Stage for SchemaStage<'_> {
    fn id(&self) -> &str {
        "schema"
    }

    fn run(&self, ctx: &mut ValidationContext) -> BomResult<()> {
        let found = self.validator.validate(ctx.document(), self.schema)?;
        for v in found {
            let message = v.render();
            ctx.push(ViolationKind::SchemaViolation, v.path, message);
        }
        Ok(())
    }
}

/// Stage: checks that do not depend on schema tooling.
///
/// - component ids are unique
/// - `bom.version` and every component version parse strictly
/// - `depends_on` edges form no cycle
///
/// Works on the generic document so a badly typed field in one place never
/// hides a problem somewhere else. Fields that are absent or not strings are
/// skipped; reporting those is the schema's job. `schema_version` support is
/// also left to the schema.
pub struct SemanticStage;

impl Stage for SemanticStage {
    fn id(&self) -> &str {
        "semantic"
    }

    fn run(&self, ctx: &mut ValidationContext) -> BomResult<()> {
        let document = ctx.document().clone();
        let components = component_fields(&document);

        check_unique_ids(&components, ctx);
        check_versions(&document, &components, ctx);
        if components.iter().any(|c| !c.depends_on.is_empty()) {
            check_acyclic(&components, ctx);
        }
        Ok(())
    }
}

/// The string-valued fields of one `components[]` entry.
struct ComponentFields<'v> {
    index: usize,
    id: Option<&'v str>,
    version: Option<&'v str>,
    hash: Option<&'v str>,
    /// Union of `depends_on` and `dependsOn`, in that order.
    depends_on: Vec<&'v str>,
}

fn component_fields(document: &Value) -> Vec<ComponentFields<'_>> {
    let Some(items) = document.get("components").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(index, c)| ComponentFields {
            index,
            id: str_field(c, "id"),
            version: str_field(c, "version"),
            hash: str_field(c, "hash"),
            depends_on: DEPENDS_ON_KEYS
                .iter()
                .filter_map(|k| c.get(*k).and_then(Value::as_array))
                .flatten()
                .filter_map(Value::as_str)
                .collect(),
        })
        .collect()
}

const DEPENDS_ON_KEYS: [&str; 2] = ["depends_on", "dependsOn"];

fn str_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn check_unique_ids(components: &[ComponentFields<'_>], ctx: &mut ValidationContext) {
    let mut seen = BTreeSet::new();
    for c in components {
        let Some(id) = c.id else { continue };
        if !seen.insert(id) {
            let path = format!("components.{}.id", c.index);
            let err = BomError::DuplicateComponentId { id: id.to_string() };
            ctx.push(ViolationKind::DuplicateComponentId, path.clone(), format!("{path}: {err}"));
        }
    }
}

fn check_versions(document: &Value, components: &[ComponentFields<'_>], ctx: &mut ValidationContext) {
    let bom_version = document
        .get("bom")
        .and_then(|b| str_field(b, "version"));

    let fields = bom_version
        .map(|v| ("bom.version".to_string(), v))
        .into_iter()
        .chain(components.iter().filter_map(|c| {
            c.version
                .map(|v| (format!("components.{}.version", c.index), v))
        }));

    for (path, raw) in fields {
        if let Err(e) = BomVersion::parse(raw) {
            ctx.push(ViolationKind::InvalidVersion, path.clone(), format!("{path}: {e}"));
        }
    }
}

fn check_acyclic(components: &[ComponentFields<'_>], ctx: &mut ValidationContext) {
    let mut deps: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for c in components {
        let Some(id) = c.id else { continue };
        deps.entry(id.to_string())
            .or_default()
            .extend(c.depends_on.iter().map(|d| d.to_string()));
    }

    if let Some(path) = graph::find_cycle(&deps) {
        let err = BomError::DependencyCycle { path };
        ctx.push(ViolationKind::DependencyCycle, "components", format!("components: {err}"));
    }
}

/// Stage: recompute each component's fingerprint from its body.
///
/// Mismatches and unresolvable bodies are recorded, never fatal.
pub struct IntegrityStage<'a> {
    content: &'a dyn ContentSource,
}

impl<'a> IntegrityStage<'a> {
    pub fn new(content: &'a dyn ContentSource) -> Self {
        Self { content }
    }
}

impl Stage for IntegrityStage<'_> {
    fn id(&self) -> &str {
        "integrity"
    }

    fn run(&self, ctx: &mut ValidationContext) -> BomResult<()> {
        let document = ctx.document().clone();

        for c in component_fields(&document) {
            let (Some(id), Some(declared)) = (c.id, c.hash) else {
                continue;
            };
            match self.content.resolve(id) {
                Ok(body) => {
                    let computed = compute_fingerprint(&body);
                    if computed != declared {
                        let path = format!("components.{}.hash", c.index);
                        let err = BomError::HashMismatch {
                            id: id.to_string(),
                            declared: declared.to_string(),
                            computed,
                        };
                        ctx.push(ViolationKind::HashMismatch, path.clone(), format!("{path}: {err}"));
                    }
                }
                Err(source) => {
                    let path = format!("components.{}.id", c.index);
                    let err = BomError::ComponentNotFound {
                        id: id.to_string(),
                        source,
                    };
                    ctx.push(ViolationKind::ComponentNotFound, path.clone(), format!("{path}: {err}"));
                }
            }
        }
        Ok(())
    }
}
