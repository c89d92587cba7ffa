//! Reactive backing for the core controllers.
//!
//! DESIGN
//! ======
//! Controllers mutate state through `StateCell`; wrapping an `RwSignal`
//! makes every transition re-render whatever reads the signal. Controller
//! reads are untracked so calling a controller inside an effect does not
//! subscribe that effect to the controller's own state.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use agriscan::StateCell;
use leptos::prelude::*;

/// `RwSignal` adapter for [`StateCell`].
#[derive(Debug)]
pub struct SignalCell<T: 'static>(RwSignal<T>);

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalCell<T> {}

impl<T: Send + Sync + 'static> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self(RwSignal::new(value))
    }

    /// The underlying signal, for tracked reads in views.
    pub fn signal(&self) -> RwSignal<T> {
        self.0
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        self.0.update(f);
    }
}
