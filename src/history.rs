//! Past diagnoses for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One bulk fetch populates the list; entries leave it one at a time, and
//! only after the server confirms the delete. Server order is preserved.
//!
//! DESIGN
//! ======
//! A load and a delete may overlap. Every load is stamped with a
//! generation and only the newest one may write the list; ids confirmed
//! deleted are remembered so a list fetched before the delete landed
//! cannot resurrect them. A fetched list that no longer carries such an
//! id proves the server has settled it, and the id is forgotten.
//!
//! `reset` starts a new epoch; deletes that settle after it leave the
//! fresh state untouched.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::BTreeSet;

use crate::backend::Backend;
use crate::cell::StateCell;
use crate::error::ClientError;
use crate::session::Credentials;
use crate::types::{HistoryEntry, HistoryId};

pub const LOAD_FAILED: &str = "Failed to load history";
pub const DELETE_FAILED: &str = "Failed to delete item";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this record?";
pub const SIGNED_OUT: &str = "Please log in to view history";

/// Interactive yes/no gate in front of destructive actions.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirmation for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryState {
    pub entries: Vec<HistoryEntry>,
    /// True until the first load settles, and again while a reload runs.
    pub loading: bool,
    /// Last failure, shown until dismissed or the action is retried.
    pub notice: Option<String>,
    pending: BTreeSet<HistoryId>,
    removed: BTreeSet<HistoryId>,
    generation: u64,
    epoch: u64,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loading: true,
            notice: None,
            pending: BTreeSet::new(),
            removed: BTreeSet::new(),
            generation: 0,
            epoch: 0,
        }
    }
}

impl HistoryState {
    /// Whether a delete for `id` is awaiting the server.
    #[must_use]
    pub fn is_deleting(&self, id: HistoryId) -> bool {
        self.pending.contains(&id)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HistoryController<C> {
    state: C,
}

impl<C: StateCell<HistoryState>> HistoryController<C> {
    pub fn new(state: C) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Fetch the full list. A failure logs, empties the list, and is not
    /// retried.
    ///
    /// # Errors
    ///
    /// [`ClientError::AuthFailure`] when signed out, otherwise
    /// [`ClientError::Request`] with the server reason or [`LOAD_FAILED`].
    /// A load superseded by a newer one returns `Ok` without writing.
    pub async fn load<B, K>(&self, backend: &B, credentials: &K) -> Result<(), ClientError>
    where
        B: Backend + ?Sized,
        K: Credentials + ?Sized,
    {
        let mut generation = 0;
        self.state.update(|s| {
            s.generation += 1;
            s.loading = true;
            s.notice = None;
            generation = s.generation;
        });

        let Some(credential) = credentials.credential() else {
            self.state.update(|s| {
                s.entries.clear();
                s.loading = false;
            });
            return Err(ClientError::AuthFailure(SIGNED_OUT.to_owned()));
        };

        let fetched = backend.history(&credential).await.map_err(|e| {
            log::warn!("history load failed: {e}");
            ClientError::request(&e, LOAD_FAILED)
        });

        let mut stale = false;
        self.state.update(|s| {
            if s.generation != generation {
                stale = true;
                return;
            }
            s.loading = false;
            match &fetched {
                Ok(entries) => {
                    s.removed.retain(|id| entries.iter().any(|e| e.id == *id));
                    s.entries = entries.iter().filter(|e| !s.removed.contains(&e.id)).cloned().collect();
                }
                Err(e) => {
                    s.entries.clear();
                    s.notice = Some(e.to_string());
                }
            }
        });
        if stale {
            log::debug!("discarding superseded history load");
            return Ok(());
        }
        fetched.map(|entries| log::debug!("history loaded: {} entries", entries.len()))
    }

    /// Delete one entry after the user confirms. The entry is removed
    /// locally only once the server has confirmed; a repeat request for an
    /// id already being deleted is ignored.
    ///
    /// # Errors
    ///
    /// [`ClientError::ConfirmationDeclined`] when the user cancels,
    /// [`ClientError::AuthFailure`] when signed out, otherwise
    /// [`ClientError::Request`] with the server reason or [`DELETE_FAILED`].
    pub async fn delete<B, K, F>(&self, backend: &B, credentials: &K, confirm: &F, id: HistoryId) -> Result<(), ClientError>
    where
        B: Backend + ?Sized,
        K: Credentials + ?Sized,
        F: Confirmation + ?Sized,
    {
        if self.state.with(|s| s.is_deleting(id)) {
            log::debug!("delete {id} already in flight");
            return Ok(());
        }
        if !confirm.confirm(DELETE_PROMPT) {
            return Err(ClientError::ConfirmationDeclined);
        }
        let Some(credential) = credentials.credential() else {
            return Err(ClientError::AuthFailure(SIGNED_OUT.to_owned()));
        };

        let mut epoch = 0;
        self.state.update(|s| {
            s.pending.insert(id);
            s.notice = None;
            epoch = s.epoch;
        });

        let outcome = backend.delete_history(&credential, id).await.map_err(|e| {
            log::warn!("history delete {id} failed: {e}");
            ClientError::request(&e, DELETE_FAILED)
        });

        let mut stale = false;
        self.state.update(|s| {
            if s.epoch != epoch {
                stale = true;
                return;
            }
            s.pending.remove(&id);
            match &outcome {
                Ok(()) => {
                    s.entries.retain(|e| e.id != id);
                    s.removed.insert(id);
                }
                Err(e) => s.notice = Some(e.to_string()),
            }
        });
        if stale {
            log::debug!("delete {id} settled after reset; dropping outcome");
        }
        outcome
    }

    pub fn dismiss_notice(&self) {
        self.state.update(|s| s.notice = None);
    }

    /// Forget everything, e.g. on logout. Loads and deletes still in
    /// flight are discarded when they land.
    pub fn reset(&self) {
        self.state.update(|s| {
            let generation = s.generation + 1;
            let epoch = s.epoch + 1;
            *s = HistoryState { generation, epoch, ..HistoryState::default() };
        });
    }
}
