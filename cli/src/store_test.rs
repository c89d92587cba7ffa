use agriscan::storage::{TOKEN_KEY, USER_KEY, load_session, save_session};
use agriscan::types::User;

use super::*;

fn store_in(dir: &tempfile::TempDir) -> FileStore {
    FileStore::new(dir.path().join("nested").join("session.json"))
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn set_creates_parent_dirs_and_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.set(TOKEN_KEY, "tok1").expect("set");

    let reopened = FileStore::new(store.path());
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("tok1"));
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[test]
fn remove_deletes_only_that_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.set(TOKEN_KEY, "tok1").expect("set");
    store.set(USER_KEY, "{}").expect("set");
    store.remove(TOKEN_KEY);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(USER_KEY).as_deref(), Some("{}"));
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    fs::write(&path, "not json").expect("write");
    let store = FileStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY), None);
    store.set(TOKEN_KEY, "tok2").expect("set");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok2"));
}

#[test]
fn session_round_trips_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    let user = User { id: None, name: "Ana".to_owned(), email: Some("a@x.com".to_owned()) };
    save_session(&store, "tok1", &user).expect("save");

    let reopened = FileStore::new(store.path());
    assert_eq!(load_session(&reopened), Some(("tok1".to_owned(), user)));
}
