//! Vault module: credential storage and persistence.
//!
//! This module provides:
//! - `CredentialEntry` and `Vault` types (`entry`)
//! - Plaintext JSON and encrypted blob file formats (`format`)
//! - `VaultStore`, the load/save state machine (`store`)
//! - `Session`, a lock-guarded unlocked vault for long-running front ends (`session`)

pub mod entry;
pub mod format;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{CredentialEntry, Vault};
pub use format::EncryptedBlob;
pub use session::Session;
pub use store::{PasswordPolicy, Unlocked, VaultFile, VaultStore};
