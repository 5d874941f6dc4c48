//! BOM data models.
//!
//! Values here are validated at construction time: a `Bom` or `Component`
//! that exists always has strict semver versions, a canonical fingerprint and
//! its required metadata. Fields are private so that stays true.
//!
//! Uniqueness of component ids and acyclicity of `depends_on` are manifest
//! level concerns. A single `Component` cannot see its siblings, so those
//! checks live in `Bom::from_manifest` and in the validation pipeline.
//!
//! The loosely typed document shape lives in [`manifest`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::determinism::hashing::Fingerprint;
use crate::errors::{BomError, BomResult};
use crate::graph;
use crate::version::{BomVersion, SchemaVersion};

pub mod manifest;

pub use manifest::{BomSection, ComponentEntry, ManifestDocument, MetadataSection};

/// Ownership metadata attached to a BOM or a component.
///
/// `license` is required on the BOM and never required on components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<String>,
}

impl Metadata {
    /// Component metadata: only `owner` is required.
    pub fn for_component(owner: impl Into<String>) -> BomResult<Self> {
        Ok(Self {
            owner: require("component.metadata.owner", owner.into())?,
            license: None,
        })
    }

    /// BOM metadata: `owner` and `license` are both required.
    pub fn for_bom(owner: impl Into<String>, license: impl Into<String>) -> BomResult<Self> {
        Ok(Self {
            owner: require("bom.metadata.owner", owner.into())?,
            license: Some(require("bom.metadata.license", license.into())?),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }
}

/// One reusable content unit referenced by a BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    id: String,
    version: BomVersion,
    hash: Fingerprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

impl Component {
    /// Build a component from its body; the fingerprint is computed here.
    pub fn from_body(
        id: impl Into<String>,
        version: &str,
        description: impl Into<String>,
        owner: impl Into<String>,
        body: &[u8],
    ) -> BomResult<Self> {
        Self::build(id.into(), version, Fingerprint::of(body), description.into(), owner.into())
    }

    /// Build a component whose hash was declared in a manifest.
    ///
    /// The hash must be well formed but is not checked against any body;
    /// use [`Component::verify_body`] or the integrity stage for that.
    pub fn with_declared_hash(
        id: impl Into<String>,
        version: &str,
        hash: &str,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> BomResult<Self> {
        let hash = Fingerprint::parse(hash)?;
        Self::build(id.into(), version, hash, description.into(), owner.into())
    }

    fn build(
        id: String,
        version: &str,
        hash: Fingerprint,
        description: String,
        owner: String,
    ) -> BomResult<Self> {
        let id = require("component.id", id)?;
        let version = BomVersion::parse(version)?;
        let metadata = Metadata::for_component(owner)?;
        Ok(Self {
            id,
            version,
            hash,
            description: Some(description).filter(|d| !d.trim().is_empty()),
            metadata,
            depends_on: Vec::new(),
        })
    }

    /// Declare dependencies. Order is kept, repeats are dropped.
    pub fn depending_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: BTreeSet<String> = self.depends_on.iter().cloned().collect();
        for d in deps {
            let d = d.into();
            if seen.insert(d.clone()) {
                self.depends_on.push(d);
            }
        }
        self
    }

    /// Check `body` against the stored fingerprint.
    pub fn verify_body(&self, body: &[u8]) -> BomResult<()> {
        if self.hash.matches(body) {
            return Ok(());
        }
        Err(BomError::HashMismatch {
            id: self.id.clone(),
            declared: self.hash.to_string(),
            computed: Fingerprint::of(body).to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &BomVersion {
        &self.version
    }

    pub fn hash(&self) -> &Fingerprint {
        &self.hash
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }
}

/// The manifest root: a named, versioned, ordered set of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bom {
    name: String,
    version: BomVersion,
    model: String,
    description: String,
    metadata: Metadata,
    components: Vec<Component>,
}

impl Bom {
    pub fn new(
        name: impl Into<String>,
        version: &str,
        model: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        license: impl Into<String>,
        components: Vec<Component>,
    ) -> BomResult<Self> {
        Ok(Self {
            name: require("bom.name", name.into())?,
            version: BomVersion::parse(version)?,
            model: model.into(),
            description: description.into(),
            metadata: Metadata::for_bom(owner, license)?,
            components,
        })
    }

    /// Convert a parsed manifest into a fully checked BOM.
    ///
    /// Beyond the per-value checks this rejects duplicate component ids and
    /// dependency cycles, so the result is always safe to assemble.
    pub fn from_manifest(doc: &ManifestDocument) -> BomResult<Self> {
        SchemaVersion::parse(&require("schema_version", doc.schema_version.clone())?)?;

        let mut components = Vec::with_capacity(doc.components.len());
        let mut seen = BTreeSet::new();

        for entry in &doc.components {
            if !entry.id.is_empty() && !seen.insert(entry.id.as_str()) {
                return Err(BomError::DuplicateComponentId {
                    id: entry.id.clone(),
                });
            }
            let c = Component::with_declared_hash(
                entry.id.as_str(),
                &entry.version,
                &entry.hash,
                entry.description.as_str(),
                entry.metadata.owner.as_str(),
            )?
            .depending_on(entry.depends_on.iter().map(String::as_str));
            components.push(c);
        }

        let bom = Self::new(
            doc.bom.name.as_str(),
            &doc.bom.version,
            doc.bom.model.as_str(),
            doc.bom.description.as_str(),
            doc.bom.metadata.owner.as_str(),
            doc.bom.metadata.license.as_str(),
            components,
        )?;

        if let Some(path) = graph::find_cycle(&bom.dependency_graph()) {
            return Err(BomError::DependencyCycle { path });
        }

        Ok(bom)
    }

    /// Append a component during incremental assembly.
    pub fn push_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Component id -> declared dependency ids.
    pub fn dependency_graph(&self) -> BTreeMap<String, Vec<String>> {
        self.components
            .iter()
            .map(|c| (c.id.clone(), c.depends_on.clone()))
            .collect()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &BomVersion {
        &self.version
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Components in assembly order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

fn require(field: &str, value: String) -> BomResult<String> {
    if value.trim().is_empty() {
        return Err(BomError::missing_field(field));
    }
    Ok(value)
}
