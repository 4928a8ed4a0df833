//! Handler for `jargo tree`.

use miette::Result;

use jargo_ops::{ops_tree, Project};

pub fn exec() -> Result<()> {
    let project = Project::discover(&super::current_dir()?)?;
    ops_tree::tree(&project)
}
