use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::cell::{LocalCell, local};
use crate::error::{ApiError, ErrorKind};
use crate::test_helpers::{FakeBackend, history_entry, poll_once};

struct Signed(Option<&'static str>);

impl Credentials for Signed {
    fn credential(&self) -> Option<String> {
        self.0.map(ToOwned::to_owned)
    }
}

const TOKEN: Signed = Signed(Some("tok1"));

fn yes(_: &str) -> bool {
    true
}

fn controller() -> HistoryController<LocalCell<HistoryState>> {
    HistoryController::new(local(HistoryState::default()))
}

fn ids(history: &HistoryController<LocalCell<HistoryState>>) -> Vec<HistoryId> {
    history.state().with(|s| s.entries.iter().map(|e| e.id).collect())
}

fn three() -> Vec<HistoryEntry> {
    vec![history_entry(1, "Tomato_healthy"), history_entry(2, "Tomato_Leaf_Mold"), history_entry(3, "Potato_Late_blight")]
}

fn loaded(backend: &FakeBackend) -> HistoryController<LocalCell<HistoryState>> {
    let history = controller();
    backend.histories.borrow_mut().push_back(Ok(three()));
    block_on(history.load(backend, &TOKEN)).expect("load");
    history
}

// =============================================================
// load
// =============================================================

#[test]
fn starts_loading_before_first_fetch() {
    assert!(HistoryState::default().loading);
}

#[test]
fn load_preserves_server_order() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    assert_eq!(ids(&history), vec![1, 2, 3]);
    assert!(!history.state().with(|s| s.loading));
    assert_eq!(backend.calls(), vec!["history tok1".to_owned()]);
}

#[test]
fn load_failure_leaves_list_empty_and_stops_loading() {
    let backend = FakeBackend::new();
    let history = controller();
    backend.histories.borrow_mut().push_back(Err(ApiError::Network("offline".to_owned())));

    let err = block_on(history.load(&backend, &TOKEN)).expect_err("offline");
    assert_eq!(err.to_string(), LOAD_FAILED);
    let state = history.state().snapshot();
    assert!(state.entries.is_empty());
    assert!(!state.loading);
    assert_eq!(state.notice.as_deref(), Some(LOAD_FAILED));
    assert_eq!(backend.calls().len(), 1);
}

#[test]
fn load_while_signed_out_never_calls_server() {
    let backend = FakeBackend::new();
    let history = controller();
    let err = block_on(history.load(&backend, &Signed(None))).expect_err("signed out");
    assert_eq!(err.kind(), ErrorKind::AuthFailure);
    assert!(backend.calls().is_empty());
    assert!(!history.state().with(|s| s.loading));
}

#[test]
fn newest_load_wins_when_loads_overlap() {
    let backend = FakeBackend::new();
    let history = controller();
    let release = backend.gate_next();
    // Responses are handed out in completion order: the second load settles first.
    backend.histories.borrow_mut().push_back(Ok(vec![history_entry(9, "Corn_healthy")]));
    backend.histories.borrow_mut().push_back(Ok(three()));

    let mut first = Box::pin(history.load(&backend, &TOKEN));
    assert!(poll_once(first.as_mut()).is_pending());
    block_on(history.load(&backend, &TOKEN)).expect("second load");
    release.send(()).expect("release");
    block_on(first).expect("first load");

    assert_eq!(ids(&history), vec![9]);
}

// =============================================================
// delete
// =============================================================

#[test]
fn deleting_middle_entry_keeps_neighbours_in_order() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    backend.deletions.borrow_mut().push_back(Ok(()));

    block_on(history.delete(&backend, &TOKEN, &yes, 2)).expect("delete");

    assert_eq!(ids(&history), vec![1, 3]);
    assert_eq!(backend.calls().last().map(String::as_str), Some("delete tok1 2"));
}

#[test]
fn failed_delete_keeps_entry_and_raises_notice() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    backend.deletions.borrow_mut().push_back(Err(ApiError::from_status(500, "<html>oops</html>")));

    let err = block_on(history.delete(&backend, &TOKEN, &yes, 2)).expect_err("server error");
    assert_eq!(err, ClientError::Request { status: Some(500), message: DELETE_FAILED.to_owned() });
    assert_eq!(ids(&history), vec![1, 2, 3]);
    assert_eq!(history.state().with(|s| s.notice.clone()), Some(DELETE_FAILED.to_owned()));
    assert!(!history.state().with(|s| s.is_deleting(2)));

    history.dismiss_notice();
    assert_eq!(history.state().with(|s| s.notice.clone()), None);
}

#[test]
fn declined_confirmation_is_a_silent_noop() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    let prompts = RefCell::new(Vec::new());
    let decline = |prompt: &str| {
        prompts.borrow_mut().push(prompt.to_owned());
        false
    };

    let err = block_on(history.delete(&backend, &TOKEN, &decline, 2)).expect_err("declined");
    assert!(err.is_silent());
    assert_eq!(*prompts.borrow(), vec![DELETE_PROMPT.to_owned()]);
    assert_eq!(backend.calls().len(), 1);
    assert_eq!(ids(&history), vec![1, 2, 3]);
}

#[test]
fn repeat_delete_while_in_flight_is_ignored() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    let release = backend.gate_next();
    backend.deletions.borrow_mut().push_back(Ok(()));

    let mut first = Box::pin(history.delete(&backend, &TOKEN, &yes, 2));
    assert!(poll_once(first.as_mut()).is_pending());
    assert!(history.state().with(|s| s.is_deleting(2)));

    block_on(history.delete(&backend, &TOKEN, &yes, 2)).expect("ignored");
    release.send(()).expect("release");
    block_on(first).expect("delete");

    let deletes = backend.calls().iter().filter(|c| c.starts_with("delete")).count();
    assert_eq!(deletes, 1);
    assert_eq!(ids(&history), vec![1, 3]);
}

#[test]
fn load_landing_after_delete_does_not_resurrect_entry() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    let release = backend.gate_next();
    backend.histories.borrow_mut().push_back(Ok(three()));
    backend.deletions.borrow_mut().push_back(Ok(()));

    let mut reload = Box::pin(history.load(&backend, &TOKEN));
    assert!(poll_once(reload.as_mut()).is_pending());
    block_on(history.delete(&backend, &TOKEN, &yes, 2)).expect("delete");
    release.send(()).expect("release");
    block_on(reload).expect("reload");

    assert_eq!(ids(&history), vec![1, 3]);
}

#[test]
fn settled_ids_are_forgotten_once_a_load_omits_them() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    backend.deletions.borrow_mut().push_back(Ok(()));
    block_on(history.delete(&backend, &TOKEN, &yes, 2)).expect("delete");
    assert!(history.state().with(|s| s.removed.contains(&2)));

    backend.histories.borrow_mut().push_back(Ok(vec![history_entry(1, "Tomato_healthy"), history_entry(3, "Potato_Late_blight")]));
    block_on(history.load(&backend, &TOKEN)).expect("reload");

    assert!(history.state().with(|s| s.removed.is_empty()));
    assert_eq!(ids(&history), vec![1, 3]);
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_discards_entries_and_in_flight_loads() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    let release = backend.gate_next();
    backend.histories.borrow_mut().push_back(Ok(three()));

    let mut reload = Box::pin(history.load(&backend, &TOKEN));
    assert!(poll_once(reload.as_mut()).is_pending());
    history.reset();
    release.send(()).expect("release");
    block_on(reload).expect("stale load");

    let state = history.state().snapshot();
    assert!(state.entries.is_empty());
    assert!(state.loading);
}

#[test]
fn failed_delete_settling_after_reset_leaves_no_notice() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    let release = backend.gate_next();
    backend.deletions.borrow_mut().push_back(Err(ApiError::from_status(500, r#"{"message":"db down"}"#)));

    let mut pending = Box::pin(history.delete(&backend, &TOKEN, &yes, 2));
    assert!(poll_once(pending.as_mut()).is_pending());
    history.reset();
    release.send(()).expect("release");
    let _ = block_on(pending);

    let state = history.state().snapshot();
    assert_eq!(state.notice, None);
    assert!(!state.is_deleting(2));
    assert!(state.entries.is_empty());
}

#[test]
fn delete_settling_after_reset_is_not_remembered() {
    let backend = FakeBackend::new();
    let history = loaded(&backend);
    let release = backend.gate_next();
    backend.deletions.borrow_mut().push_back(Ok(()));

    let mut pending = Box::pin(history.delete(&backend, &TOKEN, &yes, 2));
    assert!(poll_once(pending.as_mut()).is_pending());
    history.reset();
    release.send(()).expect("release");
    block_on(pending).expect("delete");

    assert!(history.state().with(|s| s.removed.is_empty()));
    backend.histories.borrow_mut().push_back(Ok(three()));
    block_on(history.load(&backend, &TOKEN)).expect("load");
    assert_eq!(ids(&history), vec![1, 2, 3]);
}
