use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use prompt_bom_core::determinism::hashing::Fingerprint;
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct HashOut {
    path: PathBuf,
    hash: Fingerprint,
}

pub fn run(files: &[PathBuf]) -> Result<()> {
    let mut rows = Vec::with_capacity(files.len());
    for f in files {
        let body = fs::read(f).with_context(|| format!("reading {}", f.display()))?;
        rows.push(HashOut {
            path: f.clone(),
            hash: Fingerprint::of(&body),
        });
    }

    if output::is_json() {
        return output::print(&rows);
    }
    for r in &rows {
        println!("{}  {}", r.hash, r.path.display());
    }
    Ok(())
}
