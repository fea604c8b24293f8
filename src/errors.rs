use thiserror::Error;

/// All errors that can occur in passman.
#[derive(Debug, Error)]
pub enum PassmanError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: incorrect password or corrupted data")]
    DecryptionFailed,

    // --- Vault errors ---
    #[error("Vault is encrypted: password required")]
    PasswordRequired,

    #[error("Vault data is corrupted ({0}); restore the vault file from a backup")]
    Corrupted(String),

    #[error("Encrypted vault is too short ({len} bytes) to contain a salt and nonce")]
    FormatTooShort { len: usize },

    #[error("Service '{0}' not found")]
    ServiceNotFound(String),

    #[error("Service '{0}' already exists (use `update` to change it)")]
    ServiceAlreadyExists(String),

    // --- Editor errors ---
    #[error("Invalid JSON in edited vault: {0}")]
    InvalidEdit(String),

    #[error("Editor error: {0}")]
    EditorError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Clipboard errors ---
    #[error("Failed to copy to clipboard: {0}")]
    ClipboardError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Password mismatch: passwords do not match")]
    PasswordMismatch,
}

impl PassmanError {
    /// `true` when the caller should ask for the vault password (or redirect
    /// to an unlock flow) and try again.
    pub fn is_password_required(&self) -> bool {
        matches!(self, Self::PasswordRequired)
    }
}

/// Convenience type alias for passman results.
pub type Result<T> = std::result::Result<T, PassmanError>;
