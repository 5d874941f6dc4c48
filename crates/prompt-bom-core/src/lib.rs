//! prompt-bom-core
//!
//! Core primitives for prompt BOMs:
//! - BOM / Component models validated at construction
//! - `sha256:` content fingerprints
//! - strict semantic versions
//! - dependency cycle detection
//! - the manifest validation pipeline (parse, schema, semantic, integrity)
//! - in-order artifact assembly
//!
//! This crate performs no filesystem or network I/O. Callers pass manifest
//! bytes in and provide component bodies through [`assemble::ContentSource`].

pub mod assemble;
pub mod config;
pub mod determinism;
pub mod errors;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod version;

pub use crate::errors::{BomError, BomResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::assemble::{assemble, ContentSource, SEPARATOR};
    pub use crate::config::{validate_config, BomConfig};
    pub use crate::determinism::hashing::{compute_fingerprint, Fingerprint};
    pub use crate::graph::{find_cycle, has_cycle};
    pub use crate::model::{Bom, Component, ManifestDocument, Metadata};
    pub use crate::pipeline::{
        validate_manifest, JsonSchemaValidator, SchemaValidator, ValidationPipeline,
        ValidationReport, Violation, ViolationKind,
    };
    pub use crate::version::BomVersion;
    pub use crate::{BomError, BomResult};
}
