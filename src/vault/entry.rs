//! Credential entries and the in-memory vault.
//!
//! The in-memory `Vault` always holds plaintext values. Its `encrypted`
//! flag only tells the store how to write it back to disk.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{PassmanError, Result};

/// A single credential record stored under a service name.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CredentialEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub password: String,

    /// Reserved for per-entry encryption; always `false` at rest.
    #[serde(default)]
    pub encrypted: bool,
}

impl CredentialEntry {
    /// Create an entry holding only a password.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            login: None,
            host: None,
            comment: None,
            password: password.into(),
            encrypted: false,
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = non_empty(login.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = non_empty(host.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_empty(comment.into());
        self
    }

    /// Login or `""`.
    pub fn login(&self) -> &str {
        self.login.as_deref().unwrap_or_default()
    }

    /// Host or `""`.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or_default()
    }

    /// Comment or `""`.
    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("login", &self.login)
            .field("host", &self.host)
            .field("comment", &self.comment)
            .field("password", &"****")
            .field("encrypted", &self.encrypted)
            .finish()
    }
}

/// Turn an empty string into `None`.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, CredentialEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<BTreeMap<String, CredentialEntry>> = Option::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default())
}

/// The full set of credentials plus the persisted-encryption flag.
///
/// Entries are kept sorted by service name, so the 1-based numbers shown
/// by `list` are stable between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vault {
    /// `null` (written for a vault that was never filled) reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: BTreeMap<String, CredentialEntry>,

    #[serde(default)]
    pub encrypted: bool,
}

impl Vault {
    /// An empty, plaintext vault.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, service: &str) -> bool {
        self.entries.contains_key(service)
    }

    pub fn get(&self, service: &str) -> Option<&CredentialEntry> {
        self.entries.get(service)
    }

    pub fn get_mut(&mut self, service: &str) -> Option<&mut CredentialEntry> {
        self.entries.get_mut(service)
    }

    /// Add a new service. Fails if the name is already taken.
    pub fn add(&mut self, service: &str, entry: CredentialEntry) -> Result<()> {
        if self.entries.contains_key(service) {
            return Err(PassmanError::ServiceAlreadyExists(service.to_string()));
        }
        self.entries.insert(service.to_string(), entry);
        Ok(())
    }

    /// Insert or replace a service.
    pub fn upsert(&mut self, service: &str, entry: CredentialEntry) {
        self.entries.insert(service.to_string(), entry);
    }

    /// Remove a service and return its entry.
    pub fn remove(&mut self, service: &str) -> Result<CredentialEntry> {
        self.entries
            .remove(service)
            .ok_or_else(|| PassmanError::ServiceNotFound(service.to_string()))
    }

    /// Move an entry to a new service name.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return if self.contains(from) {
                Ok(())
            } else {
                Err(PassmanError::ServiceNotFound(from.to_string()))
            };
        }
        if self.contains(to) {
            return Err(PassmanError::ServiceAlreadyExists(to.to_string()));
        }
        let entry = self.remove(from)?;
        self.entries.insert(to.to_string(), entry);
        Ok(())
    }

    /// Service names in sorted order.
    pub fn services(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Resolve a name to itself, or `"2"` to the second service in sorted
    /// order. An exact name match wins, so all-digit names stay reachable.
    pub fn resolve(&self, service_or_number: &str) -> Result<&str> {
        if let Some((name, _)) = self.entries.get_key_value(service_or_number) {
            return Ok(name.as_str());
        }

        let trimmed = service_or_number.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            let total = self.entries.len();
            if n < 1 || n > total {
                return Err(PassmanError::CommandFailed(format!(
                    "number {n} out of range (1-{total})"
                )));
            }
            return self
                .entries
                .keys()
                .nth(n - 1)
                .map(String::as_str)
                .ok_or_else(|| PassmanError::ServiceNotFound(trimmed.to_string()));
        }

        Err(PassmanError::ServiceNotFound(service_or_number.to_string()))
    }

    /// Entries whose name, login, host or comment contains `query`
    /// (case-insensitive), paired with their 1-based number in the full list.
    pub fn filter(&self, query: &str) -> Vec<(usize, &str, &CredentialEntry)> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, (name, entry))| {
                needle.is_empty()
                    || [name.as_str(), entry.login(), entry.host(), entry.comment()]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .map(|(i, (name, entry))| (i + 1, name.as_str(), entry))
            .collect()
    }
}
