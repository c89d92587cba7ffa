//! Persisted session storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is persisted as two keys, `token` and `user` (JSON). They
//! are always written together and cleared together; a lone key left behind
//! by an interrupted write is treated as no session and removed.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::types::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize session: {0}")]
    Serialize(String),
}

/// String key-value persistence (browser localStorage, a file, memory).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Read the persisted `(credential, user)` pair.
///
/// Returns `None` unless both keys are present and the user parses. Any
/// partial or corrupt pair is cleared so the two keys never diverge.
pub fn load_session<S: KeyValueStore + ?Sized>(store: &S) -> Option<(String, User)> {
    let token = store.get(TOKEN_KEY).filter(|token| !token.is_empty());
    let user = store.get(USER_KEY);
    match (token, user) {
        (None, None) => None,
        (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some((token, user)),
            Err(e) => {
                log::warn!("discarding unreadable persisted user: {e}");
                clear_session(store);
                None
            }
        },
        _ => {
            log::warn!("discarding half-written persisted session");
            clear_session(store);
            None
        }
    }
}

/// Persist both session keys. On a failed write nothing is left behind.
///
/// # Errors
///
/// Returns a [`StorageError`] if serialization or either write fails.
pub fn save_session<S: KeyValueStore + ?Sized>(
    store: &S,
    credential: &str,
    user: &User,
) -> Result<(), StorageError> {
    let raw_user = serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;
    if let Err(e) = store.set(TOKEN_KEY, credential).and_then(|()| store.set(USER_KEY, &raw_user)) {
        clear_session(store);
        return Err(e);
    }
    Ok(())
}

/// Remove both session keys.
pub fn clear_session<S: KeyValueStore + ?Sized>(store: &S) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}
