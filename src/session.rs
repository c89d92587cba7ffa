//! Session store: the single source of truth for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards read [`SessionState`]; submission and history read the
//! bearer credential through [`Credentials`]. Nothing else touches the
//! persisted `token`/`user` keys.
//!
//! DESIGN
//! ======
//! The credential lives inside [`Identity`], so "credential present iff
//! authenticated" holds by construction. Persisted storage and in-memory
//! state change in the same synchronous step, never across an await.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::backend::Backend;
use crate::cell::StateCell;
use crate::error::ClientError;
use crate::storage::{KeyValueStore, clear_session, load_session, save_session};
use crate::types::User;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    /// A login exchange is in flight.
    Authenticating,
    Authenticated,
}

/// The authenticated user together with their bearer credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user: User,
    pub credential: String,
}

/// Session state observed by guards and pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// True until [`SessionStore::restore`] has run. Gated views render
    /// nothing while it is set.
    pub loading: bool,
    authenticating: bool,
    identity: Option<Identity>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { loading: true, authenticating: false, identity: None }
    }
}

impl SessionState {
    /// A restored, signed-in session.
    #[must_use]
    pub fn signed_in(user: User, credential: impl Into<String>) -> Self {
        Self { loading: false, authenticating: false, identity: Some(Identity { user, credential: credential.into() }) }
    }

    /// A restored, anonymous session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { loading: false, ..Self::default() }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.identity.is_some() {
            SessionStatus::Authenticated
        } else if self.authenticating {
            SessionStatus::Authenticating
        } else {
            SessionStatus::Anonymous
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.identity.as_ref().map(|i| &i.user)
    }

    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.credential.as_str())
    }
}

/// Supplies the current bearer credential at call time.
pub trait Credentials {
    fn credential(&self) -> Option<String>;
}

/// Process-wide session with a persisted backing store.
#[derive(Clone, Copy, Debug)]
pub struct SessionStore<C, S> {
    state: C,
    storage: S,
}

impl<C, S> SessionStore<C, S>
where
    C: StateCell<SessionState>,
    S: KeyValueStore,
{
    pub fn new(state: C, storage: S) -> Self {
        Self { state, storage }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Rebuild the session from persisted storage without a network call
    /// and clear the `loading` gate.
    pub fn restore(&self) {
        let restored = load_session(&self.storage);
        log::debug!("session restore: signed_in={}", restored.is_some());
        self.state.update(|s| {
            s.identity = restored.map(|(credential, user)| Identity { user, credential });
            s.authenticating = false;
            s.loading = false;
        });
    }

    /// Exchange email and password for a session.
    ///
    /// Storage is written only on success, and in the same step as the
    /// in-memory state. On failure both are left as they were.
    ///
    /// # Errors
    ///
    /// [`ClientError::AuthFailure`] with the server reason or
    /// [`LOGIN_FAILED`]; also returned when a session or another login
    /// is already active.
    pub async fn login<B: Backend + ?Sized>(&self, backend: &B, email: &str, password: &str) -> Result<(), ClientError> {
        let mut blocked = None;
        self.state.update(|s| match s.status() {
            SessionStatus::Authenticated => blocked = Some("Already signed in"),
            SessionStatus::Authenticating => blocked = Some("Sign-in already in progress"),
            SessionStatus::Anonymous => s.authenticating = true,
        });
        if let Some(reason) = blocked {
            return Err(ClientError::AuthFailure(reason.to_owned()));
        }

        let response = backend.login(email, password).await;
        let outcome = response.map_err(|e| {
            log::warn!("login rejected: {e}");
            ClientError::auth(&e, LOGIN_FAILED)
        });
        let outcome = outcome.and_then(|login| {
            save_session(&self.storage, &login.access_token, &login.user)
                .map(|()| login)
                .map_err(|e| {
                    log::warn!("login succeeded but session was not persisted: {e}");
                    ClientError::AuthFailure(format!("Could not save session: {e}"))
                })
        });

        self.state.update(|s| {
            s.authenticating = false;
            if let Ok(login) = &outcome {
                s.identity = Some(Identity { user: login.user.clone(), credential: login.access_token.clone() });
            }
        });
        let login = outcome?;
        log::debug!("signed in as {}", login.user.name);
        Ok(())
    }

    /// Create an account. Never establishes a session.
    ///
    /// # Errors
    ///
    /// [`ClientError::AuthFailure`] with the server reason or
    /// [`REGISTRATION_FAILED`].
    pub async fn register<B: Backend + ?Sized>(
        &self,
        backend: &B,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        backend.register(name, email, password).await.map_err(|e| {
            log::warn!("registration rejected: {e}");
            ClientError::auth(&e, REGISTRATION_FAILED)
        })
    }

    /// Drop the session and its persisted keys. No network call.
    pub fn logout(&self) {
        clear_session(&self.storage);
        self.state.update(|s| {
            s.identity = None;
            s.authenticating = false;
            s.loading = false;
        });
        log::debug!("signed out");
    }
}

impl<C, S> Credentials for SessionStore<C, S>
where
    C: StateCell<SessionState>,
    S: KeyValueStore,
{
    fn credential(&self) -> Option<String> {
        self.state.with(|s| s.credential().map(ToOwned::to_owned))
    }
}
