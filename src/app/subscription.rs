// SPDX-License-Identifier: MPL-2.0
//! Scroll-proximity subscription.
//!
//! The rendering layer owns the end-of-list sentinel and knows when it nears
//! the viewport. It exposes that as a [`ProximitySignal`]; the controller
//! registers one callback while mounted. The registration is tied to a
//! [`SignalSubscription`] guard, so dropping the guard (on unmount, or with the
//! controller) always unregisters the callback.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Callback invoked when the sentinel nears the viewport.
pub type SignalCallback = Arc<dyn Fn() + Send + Sync>;

/// Identifies one registration on a [`ProximitySignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Source of "sentinel is near the viewport" notifications.
pub trait ProximitySignal: Send + Sync {
    /// Registers `callback` and returns its id.
    fn register(&self, callback: SignalCallback) -> ListenerId;

    /// Removes a registration. Unknown ids are ignored.
    fn unregister(&self, id: ListenerId);
}

/// Keeps one callback registered until dropped.
pub struct SignalSubscription {
    signal: Arc<dyn ProximitySignal>,
    id: ListenerId,
}

impl SignalSubscription {
    /// Registers `callback` on `signal`.
    pub fn subscribe(signal: Arc<dyn ProximitySignal>, callback: SignalCallback) -> Self {
        let id = signal.register(callback);
        Self { signal, id }
    }

    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for SignalSubscription {
    fn drop(&mut self) {
        self.signal.unregister(self.id);
    }
}

impl fmt::Debug for SignalSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSubscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// In-process [`ProximitySignal`] driven by calling [`notify`](Self::notify).
#[derive(Default)]
pub struct SentinelSignal {
    next_id: AtomicU64,
    listeners: Mutex<BTreeMap<ListenerId, SignalCallback>>,
}

impl SentinelSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every registered callback. Returns how many were called.
    pub fn notify(&self) -> usize {
        // Callbacks run outside the lock so they may (un)register.
        let callbacks: Vec<SignalCallback> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ProximitySignal for SentinelSignal {
    fn register(&self, callback: SignalCallback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, callback);
        id
    }

    fn unregister(&self, id: ListenerId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

impl fmt::Debug for SentinelSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentinelSignal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn dropping_the_guard_unregisters() {
        let signal = Arc::new(SentinelSignal::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let guard = SignalSubscription::subscribe(
            signal.clone(),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(signal.listener_count(), 1);
        assert_eq!(signal.notify(), 1);

        drop(guard);
        assert_eq!(signal.listener_count(), 0);
        assert_eq!(signal.notify(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ids_are_distinct() {
        let signal = Arc::new(SentinelSignal::new());
        let a = SignalSubscription::subscribe(signal.clone(), Arc::new(|| {}));
        let b = SignalSubscription::subscribe(signal.clone(), Arc::new(|| {}));
        assert_ne!(a.id(), b.id());
        assert_eq!(signal.notify(), 2);
    }

    #[test]
    fn unregistering_an_unknown_id_is_harmless() {
        let signal = SentinelSignal::new();
        signal.unregister(ListenerId(42));
        assert_eq!(signal.listener_count(), 0);
    }
}
