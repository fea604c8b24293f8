//! CLI module: Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod interactive;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{exe_dir, Settings};
use crate::errors::{PassmanError, Result};
use crate::vault::{PasswordPolicy, Unlocked, VaultStore};

/// Environment variable consulted before prompting for the vault password.
pub const PASSWORD_ENV_VAR: &str = "PASSMAN_PASSWORD";

/// passman: a simple local password manager.
#[derive(Parser)]
#[command(
    name = "passman",
    about = "A simple local password manager",
    long_about = "A simple and secure CLI password manager. Store, manage, encrypt, and decrypt passwords from your terminal.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file to use (default: vault.json next to the executable)
    #[arg(long, env = "PASSMAN_VAULT", global = true)]
    pub vault: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new service to the vault
    Add {
        /// Generate a random password
        #[arg(short, long)]
        generate: bool,
    },

    /// Update an existing service (select from list)
    Update {
        /// Generate a new random password
        #[arg(short, long)]
        generate: bool,
    },

    /// Remove a service (select from list)
    Remove,

    /// Copy the password of a service to the clipboard
    Copy {
        /// Service name or its number from `list`
        service: String,
    },

    /// List all services in the vault
    List {
        /// Show as a table
        #[arg(short, long)]
        table: bool,

        /// Show only entries containing this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Open the vault in a text editor
    Open {
        /// Editor command (default: config, $VISUAL, $EDITOR, vi)
        editor: Option<String>,
    },

    /// Display the path to the vault file
    Path,

    /// Encrypt the vault with a master password
    Encrypt,

    /// Decrypt the vault (store it as plain JSON)
    Decrypt,

    /// Display the status of the vault
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs: settings plus a store at the resolved path.
pub struct Context {
    pub settings: Settings,
    pub store: VaultStore,
}

impl Context {
    /// Load settings from the executable's directory and resolve the vault path.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_dir = exe_dir()?;
        let settings = Settings::load(&config_dir)?;
        let path = settings.vault_path(&config_dir, cli.vault.as_deref());
        Ok(Self {
            settings,
            store: VaultStore::new(path),
        })
    }

    /// Load the vault, prompting for the password if it is encrypted.
    pub fn unlock(&self) -> Result<Unlocked> {
        self.store.load(None, &interactive_policy())
    }
}

/// The password policy for terminal use: prompt when needed.
pub fn interactive_policy() -> PasswordPolicy<'static> {
    PasswordPolicy::Prompt(&prompt_password)
}

/// Get the vault password, trying in order:
/// 1. `PASSMAN_PASSWORD` env var (scripts, CI)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassmanError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `encrypt`).
///
/// Also respects `PASSMAN_PASSWORD` for scripted usage. Empty passwords
/// are refused.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Enter master password")
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PassmanError::CommandFailed(format!("password prompt: {e}")))?;

        if password.is_empty() {
            output::warning("Master password cannot be empty. Try again.");
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}
