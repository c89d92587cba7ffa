//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the core `Backend` seam over browser `fetch`.

pub mod api;
