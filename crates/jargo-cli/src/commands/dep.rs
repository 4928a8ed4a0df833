//! Handler for `jargo dep`.

use miette::Result;

pub fn exec(key: &str) -> Result<()> {
    let cwd = super::current_dir()?;
    jargo_ops::ops_dep::dep(&cwd, key)
}
