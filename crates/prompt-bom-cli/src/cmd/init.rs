use std::path::Path;

use anyhow::Result;
use prompt_bom_core::model::manifest::TEMPLATE_YAML;
use serde::Serialize;
use tracing::info;

use crate::io::export;
use crate::output;

#[derive(Serialize)]
struct InitOut<'a> {
    generated: &'a Path,
}

pub fn run(out: &Path) -> Result<()> {
    export::write_atomic(out, TEMPLATE_YAML.as_bytes())?;
    info!(path = %out.display(), "template written");

    if output::is_json() {
        return output::print(&InitOut { generated: out });
    }
    println!("{} generated", out.display());
    Ok(())
}
