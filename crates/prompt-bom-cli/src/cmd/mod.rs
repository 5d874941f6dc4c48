use anyhow::Result;

use crate::args::{Cli, Command};

mod build;
mod hash;
mod init;
mod validate;

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { output } => init::run(&output),
        Command::Validate { path, sources } => validate::run(&path, &sources),
        Command::Build {
            path,
            output,
            sources,
        } => build::run(&path, output.as_deref(), &sources),
        Command::Hash { files } => hash::run(&files),
    }
}
