//! Configuration structures for prompt-bom-core.
//!
//! The core crate itself does not read environment variables or files. All
//! configuration is provided explicitly by the caller (normally the CLI).

use std::path::PathBuf;

use crate::errors::{BomError, BomResult};

/// Default manifest file written by `bom init`.
pub const DEFAULT_MANIFEST_FILE: &str = "prompt.bom.yaml";

/// Global configuration container.
#[derive(Debug, Clone, Default)]
pub struct BomConfig {
    pub paths: PathsConfig,
    pub limits: LimitsConfig,
    pub assembly: AssemblyConfig,
}

/// Where component bodies and schema overrides live.
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// Directory holding `<id><extension>` component bodies.
    pub components_dir: PathBuf,
    /// Extension appended to a component id, including the dot.
    pub component_extension: String,
    /// Schema document overriding the embedded one.
    pub schema_path: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from("components"),
            component_extension: ".md".to_string(),
            schema_path: None,
        }
    }
}

/// Resource limits applied while parsing manifests.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_manifest_bytes: usize,
    pub max_components: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_manifest_bytes: 1024 * 1024,
            max_components: 10_000,
        }
    }
}

/// Assembly output settings.
#[derive(Debug, Clone)]
pub struct AssemblyConfig {
    /// Appended after every component body.
    pub separator: Vec<u8>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            separator: crate::assemble::SEPARATOR.to_vec(),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &BomConfig) -> BomResult<()> {
    if cfg.limits.max_manifest_bytes == 0 {
        return Err(BomError::config(
            "max_manifest_bytes must be greater than zero",
        ));
    }

    if cfg.limits.max_components == 0 {
        return Err(BomError::config("max_components must be greater than zero"));
    }

    let ext = &cfg.paths.component_extension;
    if ext.contains('/') || ext.contains('\\') {
        return Err(BomError::config(format!(
            "component_extension must not contain path separators: {ext}"
        )));
    }

    Ok(())
}
