//! Application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AppContext`] is provided at the root. Each controller keeps its
//! state in a [`SignalCell`], so pages read controller state reactively and
//! drive transitions by calling controller methods.

pub mod cell;


use agriscan::config::ApiConfig;
use agriscan::history::{HistoryController, HistoryState};
use agriscan::intake::{ImageIntake, IntakeState};
use agriscan::session::{SessionState, SessionStore};
use agriscan::submission::{SubmissionController, SubmissionState};
use leptos::prelude::*;

use crate::net::api::HttpBackend;
use crate::util::storage::BrowserStorage;

pub use cell::SignalCell;

pub type Session = SessionStore<SignalCell<SessionState>, BrowserStorage>;
pub type Intake = ImageIntake<SignalCell<IntakeState>>;
pub type Submission = SubmissionController<SignalCell<SubmissionState>>;
pub type History = HistoryController<SignalCell<HistoryState>>;

/// Controllers and the API client, provided once at the root.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: Session,
    pub intake: Intake,
    pub submission: Submission,
    pub history: History,
    backend: StoredValue<HttpBackend>,
}

impl AppContext {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            session: SessionStore::new(SignalCell::new(SessionState::default()), BrowserStorage),
            intake: ImageIntake::new(SignalCell::new(IntakeState::default())),
            submission: SubmissionController::new(SignalCell::new(SubmissionState::default())),
            history: HistoryController::new(SignalCell::new(HistoryState::default())),
            backend: StoredValue::new(HttpBackend::new(config)),
        }
    }

    pub fn backend(&self) -> HttpBackend {
        self.backend.get_value()
    }

    /// Sign out and drop everything that belonged to the session.
    pub fn logout(&self) {
        self.session.logout();
        self.intake.clear();
        self.submission.discard();
        self.history.reset();
    }
}
