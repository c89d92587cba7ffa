//! # agriscan
//!
//! Platform-neutral core of the AgriScan crop-diagnosis client.
//!
//! This crate owns the wire schema, the session lifecycle, image intake,
//! the prediction submission state machine, and history reconciliation.
//! Browser (`client`) and terminal (`cli`) frontends plug in their own
//! [`backend::Backend`], [`storage::KeyValueStore`], and [`cell::StateCell`]
//! implementations and drive the same controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the only source of truth for "is a user logged in". Every
//! other controller reads the bearer credential from it through
//! [`session::Credentials`] at call time and never caches it.

pub mod backend;
pub mod cell;
pub mod config;
pub mod error;
pub mod guard;
pub mod history;
pub mod intake;
pub mod session;
pub mod storage;
pub mod submission;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use backend::Backend;
pub use cell::{LocalCell, StateCell};
pub use config::ApiConfig;
pub use error::{ApiError, ClientError, ErrorKind};
pub use guard::{GuardDecision, RequireAnonymous, RequireAuthenticated, RouteGuard};
pub use history::{Confirmation, HistoryController};
pub use intake::{ImageIntake, PickedFile};
pub use session::{Credentials, SessionStore};
pub use submission::SubmissionController;
