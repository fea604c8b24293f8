//! On-disk vault formats.
//!
//! A vault file holds one of two things:
//!
//! ```text
//! plaintext:  {"entries": {...}, "encrypted": false}        (pretty JSON)
//! encrypted:  base64( salt: 16 bytes | nonce: 12 bytes | ciphertext + tag )
//! ```
//!
//! The encrypted form has no magic, version or length prefixes. Salt and
//! nonce have fixed sizes and the ciphertext takes the rest.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::entry::Vault;
use crate::crypto::{NONCE_LEN, SALT_LEN};
use crate::errors::{PassmanError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bytes that must precede the ciphertext: salt + nonce.
pub const BLOB_PREFIX_LEN: usize = SALT_LEN + NONCE_LEN;

// ---------------------------------------------------------------------------
// Structured plaintext
// ---------------------------------------------------------------------------

/// Serialize a vault as indented JSON.
pub fn to_plaintext(vault: &Vault) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(vault)
        .map_err(|e| PassmanError::SerializationError(format!("vault: {e}")))
}

/// Parse bytes as the structured vault format.
pub fn parse_plaintext(bytes: &[u8]) -> serde_json::Result<Vault> {
    serde_json::from_slice(bytes)
}

// ---------------------------------------------------------------------------
// EncryptedBlob
// ---------------------------------------------------------------------------

/// The split-out parts of an encrypted vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the GCM tag at the end.
    pub ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    /// Concatenate salt, nonce and ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BLOB_PREFIX_LEN + self.ciphertext.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Split raw (already base64-decoded) bytes.
    ///
    /// Anything shorter than salt + nonce is rejected before any
    /// decryption is attempted.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < BLOB_PREFIX_LEN {
            return Err(PassmanError::FormatTooShort { len: data.len() });
        }

        let (salt, rest) = data.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let mut blob = Self {
            salt: [0u8; SALT_LEN],
            nonce: [0u8; NONCE_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        blob.salt.copy_from_slice(salt);
        blob.nonce.copy_from_slice(nonce);
        Ok(blob)
    }

    /// Encode as the base64 text written to disk.
    pub fn encode(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Decode the base64 text of a vault file.
    ///
    /// Line breaks are ignored so a file wrapped by an editor still opens.
    pub fn decode(file_bytes: &[u8]) -> Result<Self> {
        let compact: Vec<u8> = file_bytes
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        let data = BASE64
            .decode(&compact)
            .map_err(|e| PassmanError::Corrupted(format!("not valid JSON or base64: {e}")))?;

        Self::from_bytes(&data)
    }
}
