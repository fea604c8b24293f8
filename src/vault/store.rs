//! Vault persistence: load, save and the editor round-trip.
//!
//! Every load starts from the file content alone and lands in one of
//! these states:
//!
//! | file                                   | state                   | needs password |
//! |----------------------------------------|-------------------------|----------------|
//! | missing                                | `Absent`                | no             |
//! | vault JSON, `encrypted: false`         | `Plaintext`             | no             |
//! | vault JSON, `encrypted: true`          | `EncryptedWithMetadata` | yes            |
//! | anything else                          | `Ambiguous`             | yes            |
//!
//! For the last two the *raw file bytes* are the ciphertext input. A
//! failed decrypt or an unparseable result is reported, never papered
//! over with a fallback interpretation.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::{derive_key, generate_salt, open, seal};
use crate::errors::{PassmanError, Result};

use super::entry::Vault;
use super::format::{self, EncryptedBlob};

/// Prompt shown when the file is vault JSON flagged as encrypted.
pub const ENCRYPTED_PROMPT: &str = "Vault is encrypted. Please enter your password";

/// Prompt shown when the file is not vault JSON at all.
pub const AMBIGUOUS_PROMPT: &str = "Vault seems encrypted or corrupted. Please enter password";

/// How `load` gets a password it was not given.
pub enum PasswordPolicy<'a> {
    /// Fail with `PasswordRequired` and let the caller decide (unlock forms).
    Never,
    /// Ask through the callback, which receives the prompt text.
    Prompt(&'a dyn Fn(&str) -> Result<Zeroizing<String>>),
}

/// What a vault file turned out to be, before any decryption.
pub enum VaultFile {
    Absent,
    Plaintext(Vault),
    EncryptedWithMetadata(Vec<u8>),
    Ambiguous(Vec<u8>),
}

impl VaultFile {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Plaintext(_) => "plaintext",
            Self::EncryptedWithMetadata(_) => "encrypted-with-metadata",
            Self::Ambiguous(_) => "ambiguous",
        }
    }
}

/// Classify the content of an existing vault file.
///
/// A successful parse as vault JSON is authoritative; only a failed parse
/// makes the content a presumed ciphertext.
pub fn classify(bytes: Vec<u8>) -> VaultFile {
    match format::parse_plaintext(&bytes) {
        Ok(vault) if !vault.encrypted => VaultFile::Plaintext(vault),
        Ok(_) => VaultFile::EncryptedWithMetadata(bytes),
        Err(_) => VaultFile::Ambiguous(bytes),
    }
}

/// A loaded vault plus the password that unlocked it, if any.
///
/// Hand the password back to `save` so the user is not asked twice.
pub struct Unlocked {
    pub vault: Vault,
    pub password: Option<Zeroizing<String>>,
}

impl Unlocked {
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }
}

impl fmt::Debug for Unlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unlocked")
            .field("vault", &self.vault)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

/// Handle on the vault file at a fixed path.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    /// Read and classify the file without decrypting anything.
    pub fn read_state(&self) -> Result<VaultFile> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(classify(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(VaultFile::Absent),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the vault, decrypting it when the file calls for it.
    ///
    /// `password` is used as-is when given; otherwise `policy` decides
    /// whether to prompt or fail with `PasswordRequired`. A plaintext or
    /// missing vault never consults either.
    pub fn load(&self, password: Option<&str>, policy: &PasswordPolicy<'_>) -> Result<Unlocked> {
        let state = self.read_state()?;
        debug!(path = %self.path.display(), state = state.name(), "vault file classified");

        match state {
            VaultFile::Absent => Ok(Unlocked {
                vault: Vault::new(),
                password: None,
            }),
            VaultFile::Plaintext(vault) => Ok(Unlocked {
                vault,
                password: None,
            }),
            VaultFile::EncryptedWithMetadata(raw) => {
                let password = acquire_password(password, policy, ENCRYPTED_PROMPT)?;
                let vault = decrypt_vault(&raw, &password)?;
                Ok(Unlocked {
                    vault,
                    password: Some(password),
                })
            }
            VaultFile::Ambiguous(raw) => {
                let password = acquire_password(password, policy, AMBIGUOUS_PROMPT)?;
                let vault = decrypt_vault(&raw, &password)?;
                Ok(Unlocked {
                    vault,
                    password: Some(password),
                })
            }
        }
    }

    /// Report whether loading would need a password.
    ///
    /// Content that is not vault JSON counts as encrypted: it is either
    /// a ciphertext or corrupted, and both belong on the password path.
    pub fn is_encrypted(&self) -> Result<bool> {
        Ok(match self.read_state()? {
            VaultFile::Absent => false,
            VaultFile::Plaintext(vault) => vault.encrypted,
            VaultFile::EncryptedWithMetadata(_) | VaultFile::Ambiguous(_) => true,
        })
    }

    // ------------------------------------------------------------------
    // Save
    // ------------------------------------------------------------------

    /// Write the whole vault, replacing whatever was on disk.
    ///
    /// An encrypted vault is sealed under a key derived from a fresh salt,
    /// so two saves of the same vault never produce the same bytes.
    pub fn save(&self, vault: &Vault, password: Option<&str>) -> Result<()> {
        let plaintext = Zeroizing::new(format::to_plaintext(vault)?);

        if vault.encrypted {
            // An empty password is valid; only a missing one is refused.
            let password = password.ok_or(PassmanError::PasswordRequired)?;

            let salt = generate_salt();
            let key = derive_key(password.as_bytes(), &salt);
            let (nonce, ciphertext) = seal(&key, &plaintext)?;
            let blob = EncryptedBlob {
                salt,
                nonce,
                ciphertext,
            };
            self.write_file(blob.encode().as_bytes())?;
        } else {
            self.write_file(&plaintext)?;
        }

        info!(
            path = %self.path.display(),
            entries = vault.len(),
            encrypted = vault.encrypted,
            "vault saved"
        );
        Ok(())
    }

    /// Replace the vault file via a private temp file and a rename.
    fn write_file(&self, contents: &[u8]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // tempfile creates the file readable by the owner only.
        let mut tmp = tempfile::Builder::new()
            .prefix(".vault-")
            .suffix(".tmp")
            .tempfile_in(parent)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
        }

        tmp.persist(&self.path).map_err(|e| PassmanError::Io(e.error))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Editor round-trip
    // ------------------------------------------------------------------

    /// Decrypt to a private temp file, let `edit` change it, then save
    /// the result with the password that unlocked the vault.
    ///
    /// The edited document replaces the vault wholesale. The temp file is
    /// wiped and removed on every exit path.
    pub fn edit_with<F>(&self, policy: &PasswordPolicy<'_>, edit: F) -> Result<Vault>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let unlocked = self.load(None, policy)?;

        let buffer = EditBuffer::create(&format::to_plaintext(&unlocked.vault)?)?;
        debug!(path = %buffer.path().display(), "vault written to edit buffer");

        edit(buffer.path())?;

        let edited = Zeroizing::new(fs::read(buffer.path())?);
        drop(buffer);

        let vault =
            format::parse_plaintext(&edited).map_err(|e| PassmanError::InvalidEdit(e.to_string()))?;

        self.save(&vault, unlocked.password())?;
        Ok(vault)
    }
}

/// Take the supplied password, or fall back to the policy.
fn acquire_password(
    supplied: Option<&str>,
    policy: &PasswordPolicy<'_>,
    prompt: &str,
) -> Result<Zeroizing<String>> {
    match (supplied, policy) {
        (Some(password), _) => Ok(Zeroizing::new(password.to_string())),
        (None, PasswordPolicy::Never) => Err(PassmanError::PasswordRequired),
        (None, PasswordPolicy::Prompt(ask)) => ask(prompt),
    }
}

/// Decrypt raw file bytes and parse the result as vault JSON.
fn decrypt_vault(raw: &[u8], password: &str) -> Result<Vault> {
    let blob = EncryptedBlob::decode(raw)?;
    let key = derive_key(password.as_bytes(), &blob.salt);
    let plaintext = Zeroizing::new(open(&key, &blob.nonce, &blob.ciphertext)?);

    let mut vault = format::parse_plaintext(&plaintext)
        .map_err(|e| PassmanError::Corrupted(format!("decrypted vault is not valid JSON: {e}")))?;

    // The file we just read was encrypted, whatever the inner flag says.
    vault.encrypted = true;
    Ok(vault)
}

/// Private temp file holding decrypted vault JSON.
///
/// Dropping it overwrites the content with zeros and deletes the file.
struct EditBuffer {
    file: tempfile::NamedTempFile,
}

impl EditBuffer {
    fn create(contents: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("vault-")
            .suffix(".json")
            .tempfile()?;
        file.write_all(contents)?;
        file.flush()?;
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for EditBuffer {
    fn drop(&mut self) {
        // Editors may have replaced the file, so wipe by path.
        if let Ok(metadata) = fs::metadata(self.file.path()) {
            let len = usize::try_from(metadata.len()).unwrap_or(0);
            if len > 0 {
                if let Ok(mut f) = fs::OpenOptions::new().write(true).open(self.file.path()) {
                    let _ = f.write_all(&vec![0u8; len]);
                    let _ = f.flush();
                }
            }
        }
    }
}
