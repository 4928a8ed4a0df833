//! Operation: re-resolve every dependency from the declarations.

use jargo_resolver::ResolveMode;

use crate::ops_resolve::{self, Project};

/// Rebuild the dependency graph regardless of what is on record.
pub fn update(project: &Project, verbose: bool) -> miette::Result<()> {
    let resolution = ops_resolve::resolve(project, Some(ResolveMode::UpdateAndAnalyse))?;
    ops_resolve::report(&resolution, verbose);
    jargo_util::progress::status(
        "Updated",
        &format!("dependency graph at {}", project.graph_path().display()),
    );
    Ok(())
}
