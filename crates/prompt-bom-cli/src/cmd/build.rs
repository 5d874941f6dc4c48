use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use prompt_bom_core::assemble::assemble_with_separator;
use prompt_bom_core::model::Bom;
use prompt_bom_core::pipeline::parse::parse_manifest;
use tracing::info;

use crate::args::SourceArgs;
use crate::cmd::validate;
use crate::io::components::DirContentSource;
use crate::io::{export, input};
use crate::output;

pub fn run(path: &Path, out: Option<&Path>, sources: &SourceArgs) -> Result<()> {
    let raw = input::read_manifest(path)?;
    let artifact = artifact(path, &raw, sources)?;

    match out {
        Some(file) => {
            export::write_atomic(file, &artifact)?;
            info!(bytes = artifact.len(), path = %file.display(), "artifact written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&artifact)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Validate `raw` and assemble it. The same bytes feed both steps.
pub(crate) fn artifact(path: &Path, raw: &[u8], sources: &SourceArgs) -> Result<Vec<u8>> {
    let report = validate::check(path, raw, sources)?;
    if !report.is_valid() {
        output::report(&report)?;
        report.into_result()?;
    }

    let cfg = sources.to_config();
    let doc = parse_manifest(raw, &cfg.limits)?;
    let bom = Bom::from_manifest(&doc)?;

    let content = DirContentSource::new(&cfg.paths.components_dir, &cfg.paths.component_extension);
    let artifact = assemble_with_separator(&bom, &content, &cfg.assembly.separator)
        .with_context(|| format!("assembling {}", path.display()))?;
    info!(
        bom = bom.name(),
        components = bom.components().len(),
        bytes = artifact.len(),
        "artifact assembled"
    );
    Ok(artifact)
}
