//! `passman update`: change an existing service, one after another.

use zeroize::{Zeroize, Zeroizing};

use crate::cli::interactive::{choose_service, read_input, read_password};
use crate::cli::{output, Cli, Context};
use crate::errors::{PassmanError, Result};
use crate::vault::entry::non_empty;
use crate::vault::CredentialEntry;

/// Execute the `update` command.
pub fn execute(cli: &Cli, generate: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut unlocked = ctx.unlock()?;

    loop {
        if unlocked.vault.is_empty() {
            output::info("No services to update.");
            break;
        }

        let service = match choose_service(&unlocked.vault, "update") {
            Ok(service) => service,
            Err(PassmanError::UserCancelled) => break,
            Err(e) => return Err(e),
        };

        let entry = unlocked
            .vault
            .get_mut(&service)
            .ok_or_else(|| PassmanError::ServiceNotFound(service.clone()))?;

        // Enter keeps the shown value.
        entry.login = non_empty(read_input("Login", entry.login())?);
        entry.host = non_empty(read_input("Host", entry.host())?);
        entry.comment = non_empty(read_input("Comment", entry.comment())?);

        let new_password = if generate {
            Some(super::generate_password(&ctx.settings)?)
        } else {
            let typed = Zeroizing::new(read_password("Password (Enter to keep current)")?);
            (!typed.is_empty()).then_some(typed)
        };
        if let Some(password) = &new_password {
            entry.password.zeroize();
            entry.password = password.as_str().to_owned();
        }

        ctx.store.save(&unlocked.vault, unlocked.password())?;

        let what = format!("Password for '{service}' updated");
        match &new_password {
            Some(password) if generate => super::copy_after_save(password, &what),
            _ => output::success(&format!("{what}.")),
        }

        if let Some(entry) = unlocked.vault.get(&service) {
            print_summary(&service, entry);
        }
        super::print_compact(&unlocked.vault);

        if !super::keep_going(&ctx.settings)? {
            break;
        }
    }

    Ok(())
}

/// Show the values just saved, password masked.
fn print_summary(service: &str, entry: &CredentialEntry) {
    println!();
    println!("  New values:");
    println!("    Service:  {service}");
    println!("    Login:    {}", or_empty(entry.login()));
    println!("    Host:     {}", or_empty(entry.host()));
    println!("    Comment:  {}", or_empty(entry.comment()));
    println!("    Password: ****");
    println!();
}

fn or_empty(value: &str) -> &str {
    if value.is_empty() {
        "(empty)"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_empty_marks_blank_fields() {
        assert_eq!(or_empty(""), "(empty)");
        assert_eq!(or_empty("alice"), "alice");
    }
}
