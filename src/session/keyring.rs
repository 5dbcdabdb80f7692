//
//  generic-api
//  session/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keyring-Backed Session Storage
//!
//! Session tokens are kept in the system's native keyring/keychain service:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: Application identifier (`generic-api`)
//! - **Username/Key**: The fixed entry name (`external-token`, `ams_token`, `orgCode`)
//! - **Password/Value**: The raw token or organization code
//!
//! ## Example
//!
//! ```rust,no_run
//! use generic_api::session::{KeyringStore, ACCESS_TOKEN_KEY};
//!
//! fn login(token: &str) -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store(ACCESS_TOKEN_KEY, token)?;
//!     assert_eq!(store.get(ACCESS_TOKEN_KEY)?.as_deref(), Some(token));
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

use super::{SessionContext, SessionSource, SESSION_KEYS};

const SERVICE_NAME: &str = "generic-api";

/// Key-value access to the system keyring under the application's service name.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    pub fn store(&self, key: &str, value: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }

    /// Removes every session entry.
    pub fn clear(&self) -> Result<()> {
        for key in SESSION_KEYS {
            self.delete(key)?;
        }
        Ok(())
    }
}

/// Session source reading the three session entries from the keyring.
///
/// Entries are read on every [`load`](SessionSource::load), so tokens written
/// by a login flow after the client was built are picked up. An unreadable
/// entry counts as absent.
#[derive(Default)]
pub struct KeyringSession {
    store: KeyringStore,
}

impl KeyringSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Keyring lookup for {} failed: {}", key, e);
                None
            }
        }
    }
}

impl SessionSource for KeyringSession {
    fn load(&self) -> SessionContext {
        SessionContext {
            external_token: self.read(super::EXTERNAL_TOKEN_KEY),
            access_token: self.read(super::ACCESS_TOKEN_KEY),
            org_code: self.read(super::ORG_CODE_KEY),
        }
    }
}
