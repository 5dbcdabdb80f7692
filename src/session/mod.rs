//
//  generic-api
//  session/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Module
//!
//! The backend authenticates every request with up to three opaque values
//! (external token, primary access token, organization code). They are written
//! by a login flow elsewhere and only read here.
//!
//! ## Components
//!
//! - [`SessionContext`]: The three values at one point in time
//! - [`SessionSource`]: Where the client reads the context from on each request
//! - [`KeyringSession`] / [`KeyringStore`]: System keyring storage
//! - [`UnloadGuard`]: Shared flag the client disarms when the session expires
//!
//! ## Example
//!
//! ```rust
//! use generic_api::session::{SessionContext, SessionSource};
//!
//! let session = SessionContext::new()
//!     .with_access_token("abc")
//!     .with_org_code("ORG1");
//!
//! let loaded = session.load();
//! assert_eq!(loaded.access_token(), Some("abc"));
//! assert_eq!(loaded.external_token(), None);
//! ```

mod keyring;

pub use keyring::*;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Storage key of the external token.
pub const EXTERNAL_TOKEN_KEY: &str = "external-token";

/// Storage key of the primary access token.
pub const ACCESS_TOKEN_KEY: &str = "ams_token";

/// Storage key of the organization code.
pub const ORG_CODE_KEY: &str = "orgCode";

/// All session storage keys.
pub const SESSION_KEYS: [&str; 3] = [EXTERNAL_TOKEN_KEY, ACCESS_TOKEN_KEY, ORG_CODE_KEY];

/// Authentication values used to build request headers.
///
/// Empty strings are treated as absent by the accessors.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Token issued by the external identity provider.
    pub external_token: Option<String>,
    /// Primary access token of the backend.
    pub access_token: Option<String>,
    /// Organization code the user acts for.
    pub org_code: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_external_token(mut self, token: impl Into<String>) -> Self {
        self.external_token = Some(token.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_org_code(mut self, org_code: impl Into<String>) -> Self {
        self.org_code = Some(org_code.into());
        self
    }

    pub fn external_token(&self) -> Option<&str> {
        non_empty(&self.external_token)
    }

    pub fn access_token(&self) -> Option<&str> {
        non_empty(&self.access_token)
    }

    pub fn org_code(&self) -> Option<&str> {
        non_empty(&self.org_code)
    }

    /// Looks a value up by its storage key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            EXTERNAL_TOKEN_KEY => self.external_token(),
            ACCESS_TOKEN_KEY => self.access_token(),
            ORG_CODE_KEY => self.org_code(),
            _ => None,
        }
    }

    /// Returns `true` when no value is present.
    pub fn is_empty(&self) -> bool {
        SESSION_KEYS.iter().all(|key| self.get(key).is_none())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: Option<&str>| value.map(|_| "***");
        f.debug_struct("SessionContext")
            .field("external_token", &mask(self.external_token()))
            .field("access_token", &mask(self.access_token()))
            .field("org_code", &self.org_code())
            .finish()
    }
}

/// Provides the current session context.
///
/// The client calls [`load`](Self::load) once per request, so implementations
/// backed by mutable storage observe login and logout immediately.
pub trait SessionSource: Send + Sync {
    fn load(&self) -> SessionContext;
}

impl SessionSource for SessionContext {
    fn load(&self) -> SessionContext {
        self.clone()
    }
}

/// Shared "confirm before leaving" flag.
///
/// Armed by default. The client disarms it when a request finds the session
/// expired, telling the host application that there is nothing left to protect
/// and exit prompts should be skipped. Clones share the same flag.
///
/// # Example
///
/// ```rust
/// use generic_api::session::UnloadGuard;
///
/// let guard = UnloadGuard::new();
/// let seen_by_host = guard.clone();
///
/// guard.disarm();
/// assert!(!seen_by_host.is_armed());
/// ```
#[derive(Debug, Clone)]
pub struct UnloadGuard {
    armed: Arc<AtomicBool>,
}

impl Default for UnloadGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl UnloadGuard {
    pub fn new() -> Self {
        Self {
            armed: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the host should still confirm before exiting.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }

    /// Re-enables the confirmation, e.g. after a new login.
    pub fn rearm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}
