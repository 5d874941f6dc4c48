use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use prompt_bom_core::config::{BomConfig, DEFAULT_MANIFEST_FILE};

#[derive(Parser, Debug, Clone)]
#[command(name = "bom", version, about = "Prompt BOM management CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a template BOM manifest.
    Init {
        /// Output file.
        #[arg(short, long, default_value = DEFAULT_MANIFEST_FILE)]
        output: PathBuf,
    },

    /// Check a manifest against the schema and the semantic rules.
    Validate {
        /// Manifest path (YAML or JSON).
        path: PathBuf,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Concatenate component bodies in manifest order.
    Build {
        /// Manifest path (YAML or JSON).
        path: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Print the sha256 fingerprint of files, for manifest `hash` fields.
    Hash {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Where schema and component bodies come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON Schema overriding the built-in one.
    #[arg(long, env = "BOM_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Directory holding `<id><ext>` component bodies.
    #[arg(long, env = "BOM_COMPONENTS_DIR", default_value = "components")]
    pub components_dir: PathBuf,

    /// Extension appended to component ids.
    #[arg(long, default_value = ".md")]
    pub component_ext: String,

    /// Recompute component fingerprints and compare with declared hashes.
    #[arg(long)]
    pub verify_hashes: bool,
}

impl SourceArgs {
    pub fn to_config(&self) -> BomConfig {
        let mut cfg = BomConfig::default();
        cfg.paths.schema_path = self.schema.clone();
        cfg.paths.components_dir = self.components_dir.clone();
        cfg.paths.component_extension = self.component_ext.clone();
        cfg
    }
}
