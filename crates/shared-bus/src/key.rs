//! # State Keys
//!
//! Typed projections into a state record, used for per-key subscriptions
//! and typed property reads.

use std::fmt;

/// A named projection `S -> T`.
///
/// Keys are plain function pointers so they can be declared as constants:
///
/// ```
/// use shared_bus::StateKey;
///
/// #[derive(Clone, PartialEq)]
/// struct Counter { value: u32 }
///
/// const VALUE: StateKey<Counter, u32> = StateKey::new("value", |c| c.value);
/// assert_eq!(VALUE.get(&Counter { value: 3 }), 3);
/// ```
pub struct StateKey<S, T> {
    name: &'static str,
    get: fn(&S) -> T,
}

impl<S, T> StateKey<S, T> {
    /// Declare a key.
    pub const fn new(name: &'static str, get: fn(&S) -> T) -> Self {
        Self { name, get }
    }

    /// Key name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Project the value out of `state`.
    pub fn get(&self, state: &S) -> T {
        (self.get)(state)
    }
}

impl<S, T> Clone for StateKey<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for StateKey<S, T> {}

impl<S, T> fmt::Debug for StateKey<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateKey").field(&self.name).finish()
    }
}
