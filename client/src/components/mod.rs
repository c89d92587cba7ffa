//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and interaction surfaces while reading and
//! driving the controllers provided through Leptos context.

pub mod diagnosis_card;
pub mod drop_zone;
pub mod guard;
pub mod navbar;
