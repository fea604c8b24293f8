//! `passman path`: print where the vault file lives.

use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `path` command. Prints the bare path so it can be scripted.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    println!("{}", ctx.store.path().display());
    Ok(())
}
