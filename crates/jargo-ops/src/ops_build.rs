//! Operation: build the project.
//!
//! Only the dependency resolution step exists; the resolved ordering is
//! printed and compilation is reported as unavailable.

use crate::ops_resolve::{self, Project};

pub fn build(project: &Project, verbose: bool) -> miette::Result<()> {
    let resolution = ops_resolve::resolve(project, None)?;
    ops_resolve::report(&resolution, verbose);

    for artifact in &resolution.artifacts {
        println!("{artifact}");
    }

    jargo_util::progress::status_warn(
        "Skipping",
        &format!(
            "compilation of {} is not implemented yet",
            project.manifest.package.name
        ),
    );
    Ok(())
}
