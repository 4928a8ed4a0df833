//! Build command implementation.

use miette::Result;

use jargo_ops::{ops_build, Project};

pub fn exec(verbose: bool) -> Result<()> {
    let project = Project::discover(&super::current_dir()?)?;
    ops_build::build(&project, verbose)
}
