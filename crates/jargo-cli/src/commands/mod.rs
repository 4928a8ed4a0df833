//! Command dispatch and handler modules.

mod build;
mod dep;
mod tree;
mod update;

use std::path::PathBuf;

use jargo_util::errors::{JargoError, JargoResult};
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Dep { key } => dep::exec(&key),
        Command::Build => build::exec(cli.verbose),
        Command::Update => update::exec(cli.verbose),
        Command::Tree => tree::exec(),
    }
}

fn current_dir() -> JargoResult<PathBuf> {
    Ok(std::env::current_dir().map_err(JargoError::Io)?)
}
