//! `passman add`: store a new service.

use tracing::debug;

use crate::cli::interactive::{read_input, read_password};
use crate::cli::{output, Cli, Context};
use crate::errors::{PassmanError, Result};
use crate::vault::CredentialEntry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, generate: bool) -> Result<()> {
    let ctx = Context::load(cli)?;

    let service = read_input("Service name", "")?;
    if service.is_empty() {
        return Err(PassmanError::CommandFailed(
            "service name cannot be empty".into(),
        ));
    }

    let mut unlocked = ctx.unlock()?;
    if unlocked.vault.contains(&service) {
        return Err(PassmanError::ServiceAlreadyExists(service));
    }

    let login = read_input("Login (optional)", "")?;
    let host = read_input("Host (optional)", "")?;
    let comment = read_input("Comment (optional)", "")?;

    let password = if generate {
        super::generate_password(&ctx.settings)?
    } else {
        zeroize::Zeroizing::new(read_password("Password")?)
    };

    let entry = CredentialEntry::new(password.as_str())
        .with_login(login)
        .with_host(host)
        .with_comment(comment);
    unlocked.vault.add(&service, entry)?;
    ctx.store.save(&unlocked.vault, unlocked.password())?;
    debug!(entries = unlocked.vault.len(), "service added");

    let what = format!("Password for '{service}' saved");
    if generate {
        super::copy_after_save(&password, &what);
    } else {
        output::success(&format!("{what}."));
    }

    Ok(())
}
