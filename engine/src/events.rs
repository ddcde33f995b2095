//! Notifications emitted by the engine.

use parking_lot::RwLock;
use proofmesh_types::{ActorId, ProofCategory, ProofId, Timestamp};
use serde::{Deserialize, Serialize};

/// Observable engine notifications. Each call emits its events in order,
/// after its state change has been committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MeshEvent {
    ProofCreated {
        proof: ProofId,
        creator: ActorId,
        category: ProofCategory,
        at: Timestamp,
    },
    /// A verifier attested a proof. `verified` is set on the attestation that
    /// crossed the threshold.
    ProofVerified {
        proof: ProofId,
        verifier: ActorId,
        attestations: u32,
        verified: bool,
        at: Timestamp,
    },
    ProofRevoked {
        proof: ProofId,
        by: ActorId,
        at: Timestamp,
    },
    VerifierAuthorized {
        verifier: ActorId,
        at: Timestamp,
    },
    VerifierRemoved {
        verifier: ActorId,
        at: Timestamp,
    },
    ProofsLinked {
        from: ProofId,
        to: ProofId,
        by: ActorId,
        at: Timestamp,
    },
}

impl MeshEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProofCreated { .. } => "ProofCreated",
            Self::ProofVerified { .. } => "ProofVerified",
            Self::ProofRevoked { .. } => "ProofRevoked",
            Self::VerifierAuthorized { .. } => "VerifierAuthorized",
            Self::VerifierRemoved { .. } => "VerifierRemoved",
            Self::ProofsLinked { .. } => "ProofsLinked",
        }
    }

    pub fn at(&self) -> Timestamp {
        match self {
            Self::ProofCreated { at, .. }
            | Self::ProofVerified { at, .. }
            | Self::ProofRevoked { at, .. }
            | Self::VerifierAuthorized { at, .. }
            | Self::VerifierRemoved { at, .. }
            | Self::ProofsLinked { at, .. } => *at,
        }
    }
}

type Listener = Box<dyn Fn(&MeshEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the emitting thread, after the engine has released
/// its locks. A listener must not subscribe new listeners from inside its
/// callback.
pub struct EventBus {
    listeners: RwLock<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&MeshEvent) + Send + Sync + 'static) {
        self.listeners.write().push(Box::new(listener));
    }

    pub fn emit(&self, event: &MeshEvent) {
        tracing::trace!(event = event.name(), "emit");
        for listener in self.listeners.read().iter() {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn created() -> MeshEvent {
        MeshEvent::ProofCreated {
            proof: ProofId::new([1; 32]),
            creator: ActorId::new("alice"),
            category: ProofCategory::Document,
            at: Timestamp::new(7),
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let bus = EventBus::new();
        for _ in 0..3 {
            let c = Arc::clone(&counter);
            bus.subscribe(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        bus.emit(&created());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        EventBus::default().emit(&created());
    }

    #[test]
    fn event_accessors() {
        let e = created();
        assert_eq!(e.name(), "ProofCreated");
        assert_eq!(e.at(), Timestamp::new(7));
    }
}
