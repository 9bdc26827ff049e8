//! Lifecycle accounting for test elements.

use std::any::Any;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Panic message raised by an injected clone failure.
pub const INJECTED_CLONE_FAILURE: &str = "injected clone failure";

/// Whether a `catch_unwind` payload came from an injected clone failure.
pub fn is_injected_clone_failure(payload: &(dyn Any + Send)) -> bool {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied());
    message == Some(INJECTED_CLONE_FAILURE)
}

/// Shared counters of element lifecycle events.
///
/// Single-threaded: counters are `Cell`s behind an `Rc`.
#[derive(Default)]
pub struct Ledger {
    constructed: Cell<usize>,
    cloned: Cell<usize>,
    clone_assigned: Cell<usize>,
    dropped: Cell<usize>,
    /// Clones remaining before the next one panics. `None` when disarmed.
    clones_until_failure: Cell<Option<usize>>,
}

impl Ledger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Values built with [`Tracked::new`].
    pub fn constructed(&self) -> usize {
        self.constructed.get()
    }

    /// Successful `Clone::clone` calls.
    pub fn cloned(&self) -> usize {
        self.cloned.get()
    }

    /// Successful `Clone::clone_from` calls.
    pub fn clone_assigned(&self) -> usize {
        self.clone_assigned.get()
    }

    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Values currently alive.
    pub fn live(&self) -> usize {
        self.constructed() + self.cloned() - self.dropped()
    }

    /// Make the `n`th clone (or clone-assignment) from now panic.
    ///
    /// `n` is 1-based: `fail_on_clone(1)` fails the very next clone. The
    /// ledger disarms itself after firing.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn fail_on_clone(&self, n: usize) {
        assert!(n > 0, "clone failures are counted from 1");
        self.clones_until_failure.set(Some(n - 1));
    }

    /// Cancel a pending injected failure.
    pub fn disarm(&self) {
        self.clones_until_failure.set(None);
    }

    fn check_clone(&self) {
        match self.clones_until_failure.get() {
            Some(0) => {
                self.clones_until_failure.set(None);
                panic!("{INJECTED_CLONE_FAILURE}");
            }
            Some(n) => self.clones_until_failure.set(Some(n - 1)),
            None => {}
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("constructed", &self.constructed())
            .field("cloned", &self.cloned())
            .field("clone_assigned", &self.clone_assigned())
            .field("dropped", &self.dropped())
            .finish()
    }
}

/// A test element that reports its lifecycle to a [`Ledger`].
///
/// Equality and ordering look at the value only.
pub struct Tracked {
    value: i32,
    ledger: Rc<Ledger>,
}

impl Tracked {
    pub fn new(value: i32, ledger: &Rc<Ledger>) -> Self {
        ledger.constructed.set(ledger.constructed.get() + 1);
        Self {
            value,
            ledger: Rc::clone(ledger),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.check_clone();
        self.ledger.cloned.set(self.ledger.cloned.get() + 1);
        Self {
            value: self.value,
            ledger: Rc::clone(&self.ledger),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.ledger.check_clone();
        self.ledger
            .clone_assigned
            .set(self.ledger.clone_assigned.get() + 1);
        self.value = source.value;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.dropped.set(self.ledger.dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}
