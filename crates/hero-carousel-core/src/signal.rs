//! Change notifications.
//!
//! A [`Signal`] fans a value out to every connected listener in connection
//! order. The page runs on a single cooperative queue, so listeners are
//! called directly from [`Signal::emit`]; nothing is deferred.
//!
//! # Example
//!
//! ```
//! use hero_carousel_core::Signal;
//!
//! let slide_changed = Signal::<usize>::new();
//! let listener = slide_changed.connect(|index| {
//!     println!("now showing slide {index}");
//! });
//!
//! slide_changed.emit(2);
//! slide_changed.disconnect(listener);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle returned by [`Signal::connect`], used to disconnect a listener.
    pub struct ConnectionId;
}

type Listener<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A value broadcast to any number of listeners.
pub struct Signal<Args> {
    listeners: Mutex<SlotMap<ConnectionId, Listener<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Register a listener.
    pub fn connect<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.listeners.lock().insert(Arc::new(listener))
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.listeners.lock().remove(id).is_some()
    }

    /// Number of registered listeners.
    pub fn connection_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Call every listener with `args`.
    ///
    /// The listener list is snapshotted first, so a listener may connect or
    /// disconnect on this signal while it runs.
    #[tracing::instrument(skip_all, target = "hero_carousel_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let listeners: Vec<Listener<Args>> = self.listeners.lock().values().cloned().collect();
        tracing::trace!(
            target: targets::SIGNAL,
            listeners = listeners.len(),
            "emit"
        );
        for listener in listeners {
            listener(&args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listeners_run_in_connection_order() {
        let signal = Signal::<usize>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = Arc::clone(&log);
            signal.connect(move |&index| log.lock().push((tag, index)));
        }
        signal.emit(2);

        assert_eq!(*log.lock(), vec![("first", 2), ("second", 2)]);
    }

    #[test]
    fn test_disconnected_listener_is_not_called() {
        let signal = Signal::<usize>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = signal.connect(move |&index| sink.lock().push(index));
        signal.emit(1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*seen.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_listener_may_disconnect_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let own_id = Arc::new(Mutex::new(None));

        let handle = Arc::clone(&signal);
        let slot = Arc::clone(&own_id);
        let id = signal.connect(move |_| {
            if let Some(id) = slot.lock().take() {
                handle.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }
}
