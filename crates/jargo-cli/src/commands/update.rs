//! Handler for `jargo update`.

use miette::Result;

use jargo_ops::{ops_update, Project};

pub fn exec(verbose: bool) -> Result<()> {
    let project = Project::discover(&super::current_dir()?)?;
    ops_update::update(&project, verbose)
}
