//! Nullable event consumer — records every notification it receives.

use parking_lot::Mutex;
use std::sync::Arc;

/// Collects emitted events in order. Clones share the same buffer.
pub struct EventRecorder<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone + Send + 'static> EventRecorder<E> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A callback suitable for subscribing to an event bus.
    pub fn sink(&self) -> impl Fn(&E) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event: &E| events.lock().push(event.clone())
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Clone + Send + 'static> Default for EventRecorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventRecorder<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}
