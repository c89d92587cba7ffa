//! Shared mutable state handle used by every controller.
//!
//! DESIGN
//! ======
//! Controllers hold their state behind a `StateCell` so the same transition
//! logic can run against a reactive signal in the browser and a plain
//! `Rc<RefCell<_>>` in the CLI and tests. Closures passed to `update` must
//! not await; each call is one atomic step on the single-threaded loop.

use std::cell::RefCell;
use std::rc::Rc;

/// Read/write access to a piece of controller state.
pub trait StateCell<T> {
    /// Borrow the current value.
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Mutate the current value in place.
    fn update(&self, f: impl FnOnce(&mut T));

    /// Clone out the current value.
    fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }
}

/// Single-threaded cell used outside the browser.
pub type LocalCell<T> = Rc<RefCell<T>>;

impl<T> StateCell<T> for Rc<RefCell<T>> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.borrow_mut());
    }
}

/// Build a fresh [`LocalCell`].
pub fn local<T>(value: T) -> LocalCell<T> {
    Rc::new(RefCell::new(value))
}
