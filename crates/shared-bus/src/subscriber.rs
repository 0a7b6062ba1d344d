//! # Subscriptions
//!
//! Handle returned by every `subscribe*` call.

use std::fmt;
use tracing::debug;

type Detach = Box<dyn FnOnce() + Send + Sync>;

/// A live observer registration.
///
/// When dropped, the observer is removed from its store.
#[must_use = "dropping a Subscription unsubscribes the observer"]
pub struct Subscription {
    /// Observer id within its store.
    id: u64,

    /// Store label, for logs.
    label: String,

    /// Removes the observer from the store. `None` once detached.
    detach: Option<Detach>,
}

impl Subscription {
    pub(crate) fn new(id: u64, label: String, detach: Detach) -> Self {
        Self {
            id,
            label,
            detach: Some(detach),
        }
    }

    /// Observer id within its store.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the observer now.
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    /// Keep the observer registered for the lifetime of the store.
    pub fn forget(mut self) {
        self.detach = None;
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
            debug!(store = %self.label, id = self.id, "[bus] observer removed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("store", &self.label)
            .field("active", &self.detach.is_some())
            .finish()
    }
}
