//! Persisted session store: the bearer token and user profile, kept in
//! durable key-value storage so they survive page reloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`SessionStore`] treats the two entries as a pair. It performs no
//! validation of its own; the session manager decides whether a stored pair
//! is still usable. Backends implement [`KeyValueStore`]: browser
//! `localStorage` under `hydrate`, an in-memory map elsewhere.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::UserProfile;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("stored profile is unreadable: {0}")]
    Corrupt(String),
    #[error("profile could not be serialized: {0}")]
    Encode(String),
}

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage`. Inert outside the browser: reads see nothing and
/// writes report [`StorageError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.set_item(key, value).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.remove_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

/// Process-local storage for server rendering and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// A token and profile read back from storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user: UserProfile,
}

/// The token/profile pair over a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Persist both entries.
    ///
    /// # Errors
    ///
    /// If either entry fails to write, both entries are removed and the
    /// write error is returned; storage never ends up holding only one half.
    pub fn write(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let profile = serde_json::to_string(user).map_err(|e| StorageError::Encode(e.to_string()))?;
        let written = self
            .backend
            .set_item(TOKEN_KEY, token)
            .and_then(|()| self.backend.set_item(USER_KEY, &profile));
        if let Err(e) = written {
            let _ = self.clear();
            return Err(e);
        }
        Ok(())
    }

    /// Read the pair back. `None` unless both entries are present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] when the profile entry does not
    /// parse, or a backend error from the underlying store.
    pub fn read(&self) -> Result<Option<StoredSession>, StorageError> {
        let Some(token) = self.backend.get_item(TOKEN_KEY)? else {
            return Ok(None);
        };
        let Some(raw_user) = self.backend.get_item(USER_KEY)? else {
            return Ok(None);
        };
        let user = serde_json::from_str(&raw_user).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        Ok(Some(StoredSession { token, user }))
    }

    /// The raw token alone, for attaching to outgoing requests.
    ///
    /// # Errors
    ///
    /// Propagates backend read errors.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.backend.get_item(TOKEN_KEY)
    }

    /// Remove both entries. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Both removals are attempted; the first failure is returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.backend.remove_item(TOKEN_KEY);
        let user = self.backend.remove_item(USER_KEY);
        token.and(user)
    }
}
