//! Unlocked-vault session for long-running front ends.
//!
//! A `Session` caches one decrypted vault and the password that unlocked
//! it behind a single `RwLock`. Reads share the lock; mutations and
//! lock/unlock transitions take it exclusively. The server owns the
//! session and passes it by reference to each request handler.

use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::{PassmanError, Result};

use super::entry::Vault;
use super::store::{PasswordPolicy, Unlocked, VaultStore};

pub struct Session {
    store: VaultStore,
    state: RwLock<Option<Unlocked>>,
    last_used: Mutex<Instant>,
    idle_timeout: Option<Duration>,
}

impl Session {
    /// A locked session over `store`, with no idle timeout.
    pub fn new(store: VaultStore) -> Self {
        Self {
            store,
            state: RwLock::new(None),
            last_used: Mutex::new(Instant::now()),
            idle_timeout: None,
        }
    }

    /// Drop the cached vault after `timeout` without any access.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    pub fn is_unlocked(&self) -> bool {
        self.expire_if_idle();
        self.read_state().is_some()
    }

    /// Whether opening the vault will need a password.
    pub fn is_encrypted(&self) -> Result<bool> {
        self.store.is_encrypted()
    }

    /// Load the vault with `password` and cache it.
    ///
    /// On a session that is already unlocked, `password` must match the one
    /// the vault was opened with, else `DecryptionFailed` and the cache is
    /// kept. A cached plaintext vault has no password and accepts any.
    pub fn unlock(&self, password: &str) -> Result<()> {
        let mut state = self.write_state();
        match state.as_ref() {
            Some(unlocked) => {
                if unlocked.password().is_some_and(|cached| cached != password) {
                    debug!(
                        path = %self.store.path().display(),
                        "unlock with a different password refused"
                    );
                    return Err(PassmanError::DecryptionFailed);
                }
            }
            None => {
                let unlocked = self.store.load(Some(password), &PasswordPolicy::Never)?;
                *state = Some(unlocked);
                debug!(path = %self.store.path().display(), "session unlocked");
            }
        }
        self.touch();
        Ok(())
    }

    /// Forget the cached vault and password.
    pub fn lock(&self) {
        let mut state = self.write_state();
        if state.take().is_some() {
            debug!(path = %self.store.path().display(), "session locked");
        }
    }

    /// Run `f` against the cached vault under a shared lock.
    ///
    /// A plaintext (or missing) vault is loaded on first use; an
    /// encrypted one yields `PasswordRequired` until `unlock` is called.
    pub fn read<R>(&self, f: impl FnOnce(&Vault) -> R) -> Result<R> {
        self.expire_if_idle();
        {
            let state = self.read_state();
            if let Some(unlocked) = state.as_ref() {
                self.touch();
                return Ok(f(&unlocked.vault));
            }
        }

        self.load_unencrypted()?;
        let state = self.read_state();
        let unlocked = state.as_ref().ok_or(PassmanError::PasswordRequired)?;
        self.touch();
        Ok(f(&unlocked.vault))
    }

    /// Apply `f` to a copy of the vault, save it, then keep the copy.
    ///
    /// If `f` or the save fails, the cached vault is left untouched.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vault) -> Result<R>) -> Result<R> {
        self.expire_if_idle();
        self.load_unencrypted()?;

        let mut state = self.write_state();
        let unlocked = state.as_mut().ok_or(PassmanError::PasswordRequired)?;

        let mut draft = unlocked.vault.clone();
        let out = f(&mut draft)?;
        self.store.save(&draft, unlocked.password())?;
        unlocked.vault = draft;

        self.touch();
        Ok(out)
    }

    /// Cache a vault that opens without a password.
    fn load_unencrypted(&self) -> Result<()> {
        let mut state = self.write_state();
        if state.is_some() {
            return Ok(());
        }
        if self.store.is_encrypted()? {
            return Err(PassmanError::PasswordRequired);
        }
        *state = Some(self.store.load(None, &PasswordPolicy::Never)?);
        self.touch();
        Ok(())
    }

    fn expire_if_idle(&self) {
        let Some(timeout) = self.idle_timeout else {
            return;
        };
        let idle = self
            .last_used
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed();
        if idle >= timeout {
            let mut state = self.write_state();
            if state.take().is_some() {
                debug!(idle_secs = idle.as_secs(), "session locked after inactivity");
            }
        }
    }

    fn touch(&self) {
        *self.last_used.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    // A panic inside a reader or writer cannot leave the cached vault half
    // written (`update` swaps in a finished copy), so poisoning is ignored.
    fn read_state(&self) -> RwLockReadGuard<'_, Option<Unlocked>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<Unlocked>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
