//! `passman remove`: delete services picked from a list.

use crate::cli::interactive::{choose_service, confirm};
use crate::cli::{output, Cli, Context};
use crate::errors::{PassmanError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut unlocked = ctx.unlock()?;

    loop {
        if unlocked.vault.is_empty() {
            output::info("No services to remove.");
            break;
        }

        let service = match choose_service(&unlocked.vault, "remove") {
            Ok(service) => service,
            Err(PassmanError::UserCancelled) => break,
            Err(e) => return Err(e),
        };

        if confirm(&format!("Are you sure you want to remove '{service}'?"))? {
            unlocked.vault.remove(&service)?;
            ctx.store.save(&unlocked.vault, unlocked.password())?;
            output::success(&format!("Service '{service}' removed."));
        } else {
            output::info("Cancelled.");
        }

        super::print_compact(&unlocked.vault);

        if !super::keep_going(&ctx.settings)? {
            break;
        }
    }

    Ok(())
}
