//! `passman status`: entry count, encryption and location of the vault.

use console::style;

use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let unlocked = ctx.unlock()?;

    println!("{}", style("Vault status").bold());
    println!("  Entries:   {}", unlocked.vault.len());
    println!("  Encrypted: {}", unlocked.vault.encrypted);
    println!("  Path:      {}", ctx.store.path().display());

    Ok(())
}
