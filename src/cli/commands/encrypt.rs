//! `passman encrypt` / `passman decrypt`: switch the vault between
//! plaintext JSON and the password-protected form.

use crate::cli::{output, prompt_new_password, Cli, Context};
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute_encrypt(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut unlocked = ctx.unlock()?;

    if unlocked.vault.encrypted {
        output::info("Vault is already encrypted.");
        return Ok(());
    }

    let password = prompt_new_password()?;
    unlocked.vault.encrypted = true;
    ctx.store.save(&unlocked.vault, Some(password.as_str()))?;

    output::success("Vault encrypted successfully.");
    output::tip("Keep your master password safe: it cannot be recovered.");
    Ok(())
}

/// Execute the `decrypt` command.
pub fn execute_decrypt(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    if !ctx.store.is_encrypted()? {
        output::info("Vault is not encrypted.");
        return Ok(());
    }

    let mut unlocked = ctx.unlock()?;
    unlocked.vault.encrypted = false;
    ctx.store.save(&unlocked.vault, None)?;

    output::success("Vault decrypted successfully.");
    output::warning("Passwords are now stored in plain text.");
    Ok(())
}
