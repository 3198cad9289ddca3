// src/session/mod.rs
// =============================================================================
// The client-side session: a bearer token plus a snapshot of the logged-in
// user, both kept in persistent storage under fixed keys.
//
// Rules:
// - The user snapshot is always replaced as a whole, never merged
// - Token and user are cleared together
// =============================================================================

mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use std::sync::Arc;

use serde_json::Value;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized user snapshot.
pub const USER_KEY: &str = "user";

/// Cheap to clone: clones share the same storage.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Session over a fresh [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// The stored bearer token.
    ///
    /// A storage that cannot be read is treated like an empty one.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read token from storage");
                None
            }
        }
    }

    /// The stored user snapshot, if present and valid JSON.
    pub fn current_user(&self) -> Option<Value> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read user from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "stored user snapshot is not valid JSON");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persists the token and user returned by login/register.
    ///
    /// The user goes first. If it cannot be written the token is left alone,
    /// so a new token is never paired with the previous user.
    pub fn store_auth(&self, token: &str, user: &Value) {
        if !self.store_user(user) {
            return;
        }
        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            tracing::warn!(error = %e, "could not persist token");
        }
    }

    /// Replaces the user snapshot. Returns false if storage refused it.
    pub fn store_user(&self, user: &Value) -> bool {
        match self.storage.set(USER_KEY, &user.to_string()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "could not persist user snapshot");
                false
            }
        }
    }

    /// Removes both token and user.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(error = %e, key, "could not clear session key");
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
