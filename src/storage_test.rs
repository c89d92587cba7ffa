use std::cell::Cell;

use super::*;

fn ana() -> User {
    User { id: None, name: "Ana".to_owned(), email: Some("a@x.com".to_owned()) }
}

/// Accepts the first `allowed` writes, then rejects.
struct QuotaStore {
    inner: MemoryStore,
    allowed: Cell<usize>,
}

impl KeyValueStore for QuotaStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.allowed.get() == 0 {
            return Err(StorageError::Write { key: key.to_owned(), reason: "quota".to_owned() });
        }
        self.allowed.set(self.allowed.get() - 1);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

#[test]
fn save_then_load_returns_pair() {
    let store = MemoryStore::new();
    save_session(&store, "tok1", &ana()).expect("save");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok1"));
    assert_eq!(load_session(&store), Some(("tok1".to_owned(), ana())));
}

#[test]
fn load_empty_store_is_none() {
    assert_eq!(load_session(&MemoryStore::new()), None);
}

#[test]
fn load_clears_token_without_user() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "tok1").expect("set");
    assert_eq!(load_session(&store), None);
    assert!(store.is_empty());
}

#[test]
fn load_clears_user_without_token() {
    let store = MemoryStore::new();
    store.set(USER_KEY, r#"{"name":"Ana"}"#).expect("set");
    assert_eq!(load_session(&store), None);
    assert!(store.is_empty());
}

#[test]
fn load_clears_corrupt_user() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "tok1").expect("set");
    store.set(USER_KEY, "{not json").expect("set");
    assert_eq!(load_session(&store), None);
    assert!(store.is_empty());
}

#[test]
fn failed_second_write_leaves_nothing_behind() {
    let store = QuotaStore { inner: MemoryStore::new(), allowed: Cell::new(1) };
    let err = save_session(&store, "tok1", &ana()).expect_err("second write fails");
    assert!(matches!(err, StorageError::Write { ref key, .. } if key == USER_KEY));
    assert!(store.inner.is_empty());
}

#[test]
fn clear_removes_both_keys_only() {
    let store = MemoryStore::new();
    save_session(&store, "tok1", &ana()).expect("save");
    store.set("theme", "dark").expect("set");
    clear_session(&store);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}
