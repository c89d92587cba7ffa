//! In-memory fakes shared by controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::backend::Backend;
use crate::error::ApiError;
use crate::intake::{ImageArtifact, PickedFile};
use crate::types::{HistoryEntry, HistoryId, LoginResponse, PredictionResult, PredictionStatus, User};

type Scripted<T> = RefCell<VecDeque<Result<T, ApiError>>>;

/// Scripted [`Backend`] that records every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    pub logins: Scripted<LoginResponse>,
    pub registrations: Scripted<()>,
    pub predictions: Scripted<PredictionResult>,
    pub histories: Scripted<Vec<HistoryEntry>>,
    pub deletions: Scripted<()>,
    pub calls: RefCell<Vec<String>>,
    gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call block until the returned sender fires.
    pub fn gate_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    async fn wait_gate(&self) {
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

fn next<T>(queue: &Scripted<T>) -> Result<T, ApiError> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_owned())))
}

#[async_trait::async_trait(?Send)]
impl Backend for FakeBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.record(format!("login {email}"));
        self.wait_gate().await;
        next(&self.logins)
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> Result<(), ApiError> {
        self.record(format!("register {name} {email}"));
        self.wait_gate().await;
        next(&self.registrations)
    }

    async fn predict(&self, credential: &str, image: &ImageArtifact) -> Result<PredictionResult, ApiError> {
        self.record(format!("predict {credential} {}", image.file_name));
        self.wait_gate().await;
        next(&self.predictions)
    }

    async fn history(&self, credential: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        self.record(format!("history {credential}"));
        self.wait_gate().await;
        next(&self.histories)
    }

    async fn delete_history(&self, credential: &str, id: HistoryId) -> Result<(), ApiError> {
        self.record(format!("delete {credential} {id}"));
        self.wait_gate().await;
        next(&self.deletions)
    }
}

/// File held in memory, optionally failing its read.
pub struct MemoryFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Result<Vec<u8>, String>,
    pub reads: RefCell<usize>,
}

impl MemoryFile {
    pub fn new(name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        Self { name: name.to_owned(), mime_type: mime_type.to_owned(), bytes: Ok(bytes.to_vec()), reads: RefCell::new(0) }
    }

    pub fn unreadable(name: &str, mime_type: &str) -> Self {
        Self { bytes: Err("read aborted".to_owned()), ..Self::new(name, mime_type, &[]) }
    }
}

#[async_trait::async_trait(?Send)]
impl PickedFile for MemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        *self.reads.borrow_mut() += 1;
        self.bytes.clone()
    }
}

pub fn user(name: &str) -> User {
    User { id: None, name: name.to_owned(), email: None }
}

pub fn login_ok(credential: &str, name: &str) -> Result<LoginResponse, ApiError> {
    Ok(LoginResponse { access_token: credential.to_owned(), user: user(name) })
}

pub fn prediction(status: PredictionStatus, label: &str, confidence: f64) -> PredictionResult {
    PredictionResult { status, prediction: label.to_owned(), confidence, details: None }
}

pub fn history_entry(id: HistoryId, prediction: &str) -> HistoryEntry {
    HistoryEntry {
        id,
        created_at: "2024-05-01T10:00:00".to_owned(),
        image_path: format!("{id}.jpg"),
        prediction: prediction.to_owned(),
        confidence: 90.0,
    }
}

pub fn leaf() -> ImageArtifact {
    ImageArtifact::new("leaf.png", "image/png", vec![0x89, b'P', b'N', b'G'])
}

/// Poll a future exactly once with a no-op waker.
pub fn poll_once<F: Future + ?Sized>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(futures::task::noop_waker_ref());
    fut.poll(&mut cx)
}
