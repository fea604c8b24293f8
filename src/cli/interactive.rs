//! Interactive prompts shared by the editing commands.

use std::io::{self, BufRead, BufReader};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use crate::errors::{PassmanError, Result};
use crate::vault::Vault;

/// Read one line of text. Empty input returns `default`.
pub fn read_input(prompt: &str, default: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);
    if !default.is_empty() {
        input = input.default(default.to_string()).show_default(true);
    }
    input
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| PassmanError::CommandFailed(format!("input prompt: {e}")))
}

/// Read a hidden password. Empty input is allowed and returned as-is.
pub fn read_password(prompt: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassmanError::CommandFailed(format!("password prompt: {e}")))
}

/// Plain yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PassmanError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Let the user pick a service: first an optional filter, then a list.
///
/// Returns `UserCancelled` when the user backs out of the list.
pub fn choose_service(vault: &Vault, action: &str) -> Result<String> {
    if vault.is_empty() {
        return Err(PassmanError::CommandFailed(
            "the vault is empty; run `passman add` first".into(),
        ));
    }

    let query = read_input("Filter (Enter for all)", "")?;
    let matches = vault.filter(&query);
    if matches.is_empty() {
        return Err(PassmanError::ServiceNotFound(query));
    }

    let items: Vec<String> = matches
        .iter()
        .map(|(number, service, entry)| match entry.login() {
            "" => format!("{number}. {service}"),
            login => format!("{number}. {service} ({login})"),
        })
        .collect();

    let picked = Select::new()
        .with_prompt(format!("Select a service to {action}"))
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| PassmanError::CommandFailed(format!("selection prompt: {e}")))?
        .ok_or(PassmanError::UserCancelled)?;

    Ok(matches[picked].1.to_string())
}

/// Ask `message` on stdin and wait at most `timeout` for an answer.
///
/// No answer in time is a cancellation.
pub fn confirm_with_timeout(message: &str, timeout: Duration) -> Result<bool> {
    eprint!("{message} [y/N] ({}s): ", timeout.as_secs());
    wait_for_answer(BufReader::new(io::stdin()), timeout)
}

/// Read one line from `reader` on a helper thread and interpret it as yes/no.
///
/// The helper thread is left blocked on the reader if the wait expires;
/// the process exits soon after in that case.
pub fn wait_for_answer<R>(mut reader: R, timeout: Duration) -> Result<bool>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let read = reader.read_line(&mut line).map(|n| (n, line));
        let _ = tx.send(read);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok((0, _))) => Ok(false),
        Ok(Ok((_, line))) => Ok(is_yes(&line)),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => {
            debug!(timeout_secs = timeout.as_secs(), "confirmation timed out");
            Err(PassmanError::UserCancelled)
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
