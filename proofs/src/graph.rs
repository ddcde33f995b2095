//! Mesh graph — symmetric, permanent links between proofs.

use crate::error::ProofError;
use crate::store::ProofStore;
use proofmesh_types::{ActorId, ProofId};

/// Link operations over the proofs held in a [`ProofStore`].
///
/// Adjacency lives on the proof records themselves; this type only enforces
/// the linking rules and keeps both sides mirrored.
pub struct MeshGraph<'a> {
    store: &'a ProofStore,
}

impl<'a> MeshGraph<'a> {
    pub fn new(store: &'a ProofStore) -> Self {
        Self { store }
    }

    /// Link `a` and `b` in both directions.
    ///
    /// `caller` must have created at least one of the two proofs. Linking the
    /// same pair again adds a parallel edge.
    pub fn link(&self, a: &ProofId, b: &ProofId, caller: &ActorId) -> Result<(), ProofError> {
        self.store.with_pair_mut(a, b, |pa, pb| {
            if caller != &pa.creator && caller != &pb.creator {
                return Err(ProofError::Unauthorized(caller.to_string()));
            }
            pa.links.push(*b);
            pb.links.push(*a);
            tracing::info!(from = %a, to = %b, by = %caller, "proofs linked");
            Ok(())
        })?
    }

    /// Direct neighbors of `id`, in link order.
    pub fn neighbors(&self, id: &ProofId) -> Result<Vec<ProofId>, ProofError> {
        self.store.with_proof(id, |p| p.links.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewProof;
    use proofmesh_types::{Fingerprint, ProofCategory, Timestamp};

    fn create(store: &ProofStore, creator: &str, fp: u8) -> ProofId {
        store
            .create(
                NewProof {
                    creator: ActorId::new(creator),
                    fingerprint: Fingerprint::new([fp; 32]),
                    category: ProofCategory::Document,
                    metadata: format!("ipfs://{fp}"),
                    expires_at: None,
                },
                Timestamp::new(1),
            )
            .unwrap()
    }

    #[test]
    fn link_is_mirrored() {
        let store = ProofStore::new();
        let diploma = create(&store, "alice", 1);
        let transcript = create(&store, "alice", 2);
        let graph = MeshGraph::new(&store);

        graph.link(&diploma, &transcript, &ActorId::new("alice")).unwrap();
        assert_eq!(graph.neighbors(&diploma).unwrap(), vec![transcript]);
        assert_eq!(graph.neighbors(&transcript).unwrap(), vec![diploma]);
    }

    #[test]
    fn creator_of_either_side_may_link() {
        let store = ProofStore::new();
        let a = create(&store, "alice", 1);
        let b = create(&store, "bob", 2);
        let graph = MeshGraph::new(&store);

        graph.link(&a, &b, &ActorId::new("bob")).unwrap();
        graph.link(&b, &a, &ActorId::new("alice")).unwrap();
        assert_eq!(graph.neighbors(&a).unwrap(), vec![b, b]);

        let err = graph.link(&a, &b, &ActorId::new("carol")).unwrap_err();
        assert_eq!(err, ProofError::Unauthorized("carol".into()));
        assert_eq!(graph.neighbors(&b).unwrap().len(), 2);
    }

    #[test]
    fn self_link_and_missing_rejected() {
        let store = ProofStore::new();
        let a = create(&store, "alice", 1);
        let ghost = ProofId::new([0xee; 32]);
        let graph = MeshGraph::new(&store);
        let alice = ActorId::new("alice");

        assert_eq!(graph.link(&a, &a, &alice).unwrap_err(), ProofError::SelfLink(a));
        assert_eq!(
            graph.link(&a, &ghost, &alice).unwrap_err(),
            ProofError::NotFound(ghost)
        );
        assert_eq!(
            graph.link(&ghost, &ghost, &alice).unwrap_err(),
            ProofError::NotFound(ghost)
        );
        assert_eq!(graph.neighbors(&ghost).unwrap_err(), ProofError::NotFound(ghost));
        assert!(graph.neighbors(&a).unwrap().is_empty());
    }
}
