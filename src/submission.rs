//! Prediction submission state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! `idle -> submitting -> {succeeded, failed}`; the terminal states are left
//! only by an explicit user action (`reset`, `dismiss_error`, or a retry).
//! In-flight requests are never cancelled.

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

use crate::backend::Backend;
use crate::cell::StateCell;
use crate::error::ClientError;
use crate::intake::ImageArtifact;
use crate::session::Credentials;
use crate::types::PredictionResult;

pub const PREDICTION_FAILED: &str = "Prediction failed";
pub const SIGNED_OUT: &str = "Please log in to analyze images";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionState {
    pub phase: SubmissionPhase,
    /// Bumped by `discard`; outcomes from an older epoch are dropped.
    epoch: u64,
}

impl SubmissionState {
    #[must_use]
    pub fn loading(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting)
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            SubmissionPhase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives one prediction request at a time.
#[derive(Clone, Copy, Debug)]
pub struct SubmissionController<C> {
    state: C,
}

impl<C: StateCell<SubmissionState>> SubmissionController<C> {
    pub fn new(state: C) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Upload the staged image for classification.
    ///
    /// Returns `None` without touching the network when nothing is staged or
    /// a submission is already in flight. Otherwise returns the outcome,
    /// which is also reflected in the state. Repeating a call with the same
    /// artifact issues a fresh request.
    pub async fn submit<B, K>(
        &self,
        backend: &B,
        credentials: &K,
        artifact: Option<&ImageArtifact>,
    ) -> Option<Result<PredictionResult, ClientError>>
    where
        B: Backend + ?Sized,
        K: Credentials + ?Sized,
    {
        let artifact = artifact?;

        let mut started = None;
        self.state.update(|s| {
            if !s.loading() {
                s.phase = SubmissionPhase::Submitting;
                started = Some(s.epoch);
            }
        });
        let Some(epoch) = started else {
            log::debug!("submit ignored: request already in flight");
            return None;
        };

        let Some(credential) = credentials.credential() else {
            self.state.update(|s| s.phase = SubmissionPhase::Failed(SIGNED_OUT.to_owned()));
            return Some(Err(ClientError::AuthFailure(SIGNED_OUT.to_owned())));
        };

        let outcome = backend.predict(&credential, artifact).await.map_err(|e| {
            log::warn!("prediction failed for {}: {e}", artifact.file_name);
            ClientError::request(&e, PREDICTION_FAILED)
        });
        self.state.update(|s| {
            if s.epoch != epoch {
                return;
            }
            s.phase = match &outcome {
                Ok(result) => SubmissionPhase::Succeeded(result.clone()),
                Err(e) => SubmissionPhase::Failed(e.to_string()),
            };
        });
        Some(outcome)
    }

    /// "Scan another": discard any result or error and return to idle.
    /// An in-flight request is left to finish.
    pub fn reset(&self) {
        self.state.update(|s| {
            if !s.loading() {
                s.phase = SubmissionPhase::Idle;
            }
        });
    }

    /// Forget everything, including a request still in flight, whose
    /// outcome is dropped when it lands. Used on logout.
    pub fn discard(&self) {
        self.state.update(|s| {
            s.epoch += 1;
            s.phase = SubmissionPhase::Idle;
        });
    }

    /// Dismiss a failure message.
    pub fn dismiss_error(&self) {
        self.state.update(|s| {
            if s.error().is_some() {
                s.phase = SubmissionPhase::Idle;
            }
        });
    }
}
