//! `passman copy`: put a service's password on the clipboard.

use crate::cli::{output, Cli, Context};
use crate::clipboard::copy_to_clipboard;
use crate::errors::{PassmanError, Result};

/// Execute the `copy` command. `service` is a name or a number from `list`.
pub fn execute(cli: &Cli, service: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let unlocked = ctx.unlock()?;

    let name = unlocked.vault.resolve(service)?;
    let entry = unlocked
        .vault
        .get(name)
        .ok_or_else(|| PassmanError::ServiceNotFound(name.to_string()))?;

    copy_to_clipboard(&entry.password)?;

    match entry.login() {
        "" => output::success(&format!("Password for '{name}' copied to clipboard.")),
        login => output::success(&format!(
            "Password for '{name}' copied to clipboard (login: {login})."
        )),
    }

    Ok(())
}
