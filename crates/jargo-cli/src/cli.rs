//! CLI argument definitions for Jargo.
//!
//! Each command corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jargo",
    version,
    about = "Dependency resolution for Maven-published JVM libraries",
    long_about = "Jargo reads the dependencies declared in Jargo.toml, expands them \
                  transitively from Maven repositories, settles version conflicts and \
                  prints a dependencies-first build order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the published versions of a dependency
    Dep {
        /// Dependency key (group/artifact)
        key: String,
    },

    /// Resolve dependencies and print the build order
    Build,

    /// Re-resolve every dependency from Jargo.toml
    Update,

    /// Print the stored dependency tree
    Tree,
}

pub fn parse() -> Cli {
    Cli::parse()
}
