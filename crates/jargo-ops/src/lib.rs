pub mod ops_build;
pub mod ops_dep;
pub mod ops_resolve;
pub mod ops_tree;
pub mod ops_update;

pub use ops_resolve::Project;
