//! Artifact assembly.
//!
//! Components are concatenated strictly in manifest order, each body followed
//! by [`SEPARATOR`]. The whole artifact is built in memory; nothing reaches a
//! sink unless every component resolved, so a failure never leaves a
//! truncated artifact behind.

use std::collections::BTreeMap;
use std::io;

use tracing::debug;

use crate::errors::{BomError, BomResult};
use crate::model::Bom;

/// Appended after every component body.
pub const SEPARATOR: &[u8] = b"\n";

/// Resolves a component id to its body.
pub trait ContentSource {
    fn resolve(&self, id: &str) -> io::Result<Vec<u8>>;
}

impl ContentSource for BTreeMap<String, Vec<u8>> {
    fn resolve(&self, id: &str) -> io::Result<Vec<u8>> {
        self.get(id).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no content for `{id}`"))
        })
    }
}

/// Concatenate every component body of `bom` with the default separator.
pub fn assemble(bom: &Bom, content: &dyn ContentSource) -> BomResult<Vec<u8>> {
    assemble_with_separator(bom, content, SEPARATOR)
}

/// Concatenate every component body of `bom`, each followed by `separator`.
///
/// Stops at the first component that cannot be resolved.
pub fn assemble_with_separator(
    bom: &Bom,
    content: &dyn ContentSource,
    separator: &[u8],
) -> BomResult<Vec<u8>> {
    let mut out = Vec::new();
    for c in bom.components() {
        let body = content
            .resolve(c.id())
            .map_err(|source| BomError::ComponentNotFound {
                id: c.id().to_string(),
                source,
            })?;
        debug!(component = c.id(), bytes = body.len(), "component resolved");
        out.extend_from_slice(&body);
        out.extend_from_slice(separator);
    }
    Ok(out)
}
