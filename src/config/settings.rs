use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassmanError, Result};
use crate::generator::GeneratorOptions;

/// User configuration, loaded from `passman.toml`.
///
/// Every field has a sensible default so passman works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file location. Relative paths resolve against the config directory.
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// Editor used by `open` when none is given on the command line.
    #[serde(default)]
    pub editor: Option<String>,

    /// Seconds to wait for an answer to "Continue?" before giving up.
    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,

    /// Rows per page in `list` when writing to a terminal.
    #[serde(default = "default_list_page_size")]
    pub list_page_size: usize,

    /// Default length of generated passwords.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// Include digits in generated passwords by default.
    #[serde(default = "default_true")]
    pub generator_numbers: bool,

    /// Include punctuation in generated passwords by default.
    #[serde(default = "default_true")]
    pub generator_special: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_confirm_timeout_secs() -> u64 {
    30
}

fn default_list_page_size() -> usize {
    20
}

fn default_generator_length() -> usize {
    16
}

fn default_true() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: None,
            editor: None,
            confirm_timeout_secs: default_confirm_timeout_secs(),
            list_page_size: default_list_page_size(),
            generator_length: default_generator_length(),
            generator_numbers: default_true(),
            generator_special: default_true(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for next to the executable.
    pub const FILE_NAME: &'static str = "passman.toml";

    /// Default vault file name inside the config directory.
    pub const VAULT_FILE_NAME: &'static str = "vault.json";

    /// Load settings from `<config_dir>/passman.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassmanError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.list_page_size == 0 {
            return Err(PassmanError::ConfigError(
                "list_page_size must be at least 1".into(),
            ));
        }

        Ok(settings)
    }

    /// Resolve the vault file path.
    ///
    /// Order: explicit override (`--vault` / `PASSMAN_VAULT`), then the
    /// `vault_path` setting, then `<config_dir>/vault.json`.
    pub fn vault_path(&self, config_dir: &Path, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match &self.vault_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => config_dir.join(p),
            None => config_dir.join(Self::VAULT_FILE_NAME),
        }
    }

    /// Generator defaults taken from the settings.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            length: self.generator_length,
            numbers: self.generator_numbers,
            special: self.generator_special,
        }
    }

    pub fn confirm_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.confirm_timeout_secs)
    }
}

/// Directory holding the running executable (config and default vault live here).
pub fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        PassmanError::ConfigError(format!(
            "cannot determine directory of executable {}",
            exe.display()
        ))
    })
}

// ── Tests ────────────────────────────────────────────────────────────
