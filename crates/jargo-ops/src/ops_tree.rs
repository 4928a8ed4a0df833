//! Operation: display the persisted dependency tree.

use jargo_resolver::store::GraphStore;
use jargo_resolver::ResolveError;

use crate::ops_resolve::Project;

/// Render the stored graph without touching the network.
pub fn render(project: &Project) -> miette::Result<String> {
    let graph = project
        .graph_store()
        .load()
        .map_err(|e| ResolveError::Persistence {
            message: e.to_string(),
        })?
        .ok_or(ResolveError::MissingGraph)?;
    Ok(graph.render_tree()?)
}

/// Print the dependency tree for the project.
pub fn tree(project: &Project) -> miette::Result<()> {
    let output = render(project)?;
    if output.is_empty() {
        println!("No dependencies.");
    } else {
        print!("{output}");
    }
    Ok(())
}
