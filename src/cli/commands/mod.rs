//! One module per subcommand, plus helpers the editing commands share.

pub mod add;
pub mod completions;
pub mod copy;
pub mod encrypt;
pub mod list;
pub mod open;
pub mod path;
pub mod remove;
pub mod status;
pub mod update;

use zeroize::Zeroizing;

use crate::cli::interactive;
use crate::cli::output;
use crate::config::Settings;
use crate::errors::{PassmanError, Result};
use crate::generator::{self, GeneratorOptions};
use crate::vault::Vault;

/// Ask for generator options, offering the configured values as defaults.
pub(crate) fn prompt_generator_options(settings: &Settings) -> Result<GeneratorOptions> {
    let defaults = settings.generator_options();

    let length = interactive::read_input("Password length", &defaults.length.to_string())?;
    let length = parse_length(&length, defaults.length)?;

    let numbers = dialoguer::Confirm::new()
        .with_prompt("Include numbers?")
        .default(defaults.numbers)
        .interact()
        .map_err(|e| PassmanError::CommandFailed(format!("confirm prompt: {e}")))?;

    let special = dialoguer::Confirm::new()
        .with_prompt("Include special characters?")
        .default(defaults.special)
        .interact()
        .map_err(|e| PassmanError::CommandFailed(format!("confirm prompt: {e}")))?;

    Ok(GeneratorOptions {
        length,
        numbers,
        special,
    })
}

fn parse_length(input: &str, default: usize) -> Result<usize> {
    if input.trim().is_empty() {
        return Ok(default);
    }
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| PassmanError::CommandFailed(format!("'{input}' is not a valid length")))
}

/// Generate a password with prompted options.
pub(crate) fn generate_password(settings: &Settings) -> Result<Zeroizing<String>> {
    let options = prompt_generator_options(settings)?;
    generator::generate(&options)
}

/// Put a freshly saved password on the clipboard, warning instead of
/// failing since the vault is already written.
pub(crate) fn copy_after_save(password: &str, what: &str) {
    match crate::clipboard::copy_to_clipboard(password) {
        Ok(()) => output::success(&format!("{what} and copied to clipboard.")),
        Err(e) => {
            output::success(&format!("{what}."));
            output::warning(&format!("Clipboard copy failed: {e}"));
        }
    }
}

/// Print every service as a compact numbered line.
pub(crate) fn print_compact(vault: &Vault) {
    for (number, service, entry) in vault.filter("") {
        println!("{}", output::entry_line(number, service, entry));
    }
}

/// The "Continue?" question of the editing loops. A timeout ends the loop.
pub(crate) fn keep_going(settings: &Settings) -> Result<bool> {
    match interactive::confirm_with_timeout("Continue?", settings.confirm_timeout()) {
        Ok(answer) => Ok(answer),
        Err(PassmanError::UserCancelled) => {
            println!();
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
