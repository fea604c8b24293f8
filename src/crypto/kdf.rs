//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count, salt length and key length are part of the
//! on-disk format: the file stores only the salt, so changing any of
//! these constants makes existing vaults undecryptable.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count (fixed, not stored in the vault file).
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the per-save salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte key derived from a password, wiped from memory on drop.
///
/// Lives only for the duration of a single seal or open.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// Deterministic and infallible: any password (including the empty one)
/// yields a key. Rejecting weak passwords is the caller's job.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut bytes);
    let key = DerivedKey { bytes };
    bytes.zeroize();
    key
}

/// Generate a fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
