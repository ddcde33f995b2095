//! Proof storage with per-proof exclusive access.
//!
//! Lock order: the index lock is only ever held long enough to look up (or
//! insert) a proof's slot and is never acquired while a proof lock is held.
//! A single call never holds two proof locks, except [`ProofStore::with_pair_mut`],
//! which takes them lower identifier first.

use crate::error::ProofError;
use crate::record::{NewProof, Proof};
use parking_lot::{Mutex, RwLock};
use proofmesh_crypto::derive_proof_id;
use proofmesh_types::{ActorId, ProofId, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;

type Slot = Arc<Mutex<Proof>>;

#[derive(Default)]
struct Index {
    proofs: HashMap<ProofId, Slot>,
    /// Every identifier, in creation order.
    all: Vec<ProofId>,
    by_creator: HashMap<ActorId, Vec<ProofId>>,
    /// Next sequence number fed into identifier derivation.
    sequence: u64,
}

/// Owns every proof record. Records are never removed.
#[derive(Default)]
pub struct ProofStore {
    index: RwLock<Index>,
}

impl ProofStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from records in creation order.
    pub fn from_records(records: Vec<Proof>, sequence: u64) -> Result<Self, ProofError> {
        let mut index = Index {
            sequence,
            ..Index::default()
        };
        for proof in records {
            let id = proof.id;
            if index.proofs.contains_key(&id) {
                return Err(ProofError::DuplicateIdentifier(id));
            }
            index.all.push(id);
            index
                .by_creator
                .entry(proof.creator.clone())
                .or_default()
                .push(id);
            index.proofs.insert(id, Arc::new(Mutex::new(proof)));
        }
        Ok(Self {
            index: RwLock::new(index),
        })
    }

    fn validate(draft: &NewProof, now: Timestamp) -> Result<(), ProofError> {
        if draft.fingerprint.is_zero() {
            return Err(ProofError::InvalidInput("fingerprint must not be zero".into()));
        }
        if draft.metadata.trim().is_empty() {
            return Err(ProofError::InvalidInput(
                "metadata reference must not be empty".into(),
            ));
        }
        if let Some(expiry) = draft.expires_at {
            if expiry <= now {
                return Err(ProofError::InvalidInput(format!(
                    "expiry {expiry} is not after the current time {now}"
                )));
            }
        }
        Ok(())
    }

    /// Register a new proof in `Pending` state and return its identifier.
    pub fn create(&self, draft: NewProof, now: Timestamp) -> Result<ProofId, ProofError> {
        Self::validate(&draft, now)?;

        let mut index = self.index.write();
        let id = derive_proof_id(&draft.fingerprint, &draft.creator, now, index.sequence);
        if index.proofs.contains_key(&id) {
            tracing::error!(proof = %id, "proof identifier collision");
            return Err(ProofError::DuplicateIdentifier(id));
        }
        index.sequence += 1;

        let creator = draft.creator.clone();
        let category = draft.category;
        index.all.push(id);
        index.by_creator.entry(creator.clone()).or_default().push(id);
        index
            .proofs
            .insert(id, Arc::new(Mutex::new(Proof::new(id, draft, now))));

        tracing::info!(proof = %id, creator = %creator, %category, "proof created");
        Ok(id)
    }

    fn slot(&self, id: &ProofId) -> Result<Slot, ProofError> {
        self.index
            .read()
            .proofs
            .get(id)
            .cloned()
            .ok_or(ProofError::NotFound(*id))
    }

    /// Point-in-time copy of a proof.
    pub fn get(&self, id: &ProofId) -> Option<Proof> {
        self.slot(id).ok().map(|slot| slot.lock().clone())
    }

    /// Run `f` against a proof while holding its lock.
    pub fn with_proof<R>(&self, id: &ProofId, f: impl FnOnce(&Proof) -> R) -> Result<R, ProofError> {
        let slot = self.slot(id)?;
        let guard = slot.lock();
        Ok(f(&*guard))
    }

    /// Run `f` against a proof with exclusive access. Every check and update
    /// `f` performs is atomic with respect to other calls on the same proof.
    pub fn with_proof_mut<R>(
        &self,
        id: &ProofId,
        f: impl FnOnce(&mut Proof) -> R,
    ) -> Result<R, ProofError> {
        let slot = self.slot(id)?;
        let mut guard = slot.lock();
        Ok(f(&mut *guard))
    }

    /// Exclusive access to two distinct proofs at once, locked in identifier
    /// order. `f` receives them in argument order.
    pub fn with_pair_mut<R>(
        &self,
        a: &ProofId,
        b: &ProofId,
        f: impl FnOnce(&mut Proof, &mut Proof) -> R,
    ) -> Result<R, ProofError> {
        let slot_a = self.slot(a)?;
        let slot_b = self.slot(b)?;
        if a == b {
            return Err(ProofError::SelfLink(*a));
        }
        if a < b {
            let mut ga = slot_a.lock();
            let mut gb = slot_b.lock();
            Ok(f(&mut *ga, &mut *gb))
        } else {
            let mut gb = slot_b.lock();
            let mut ga = slot_a.lock();
            Ok(f(&mut *ga, &mut *gb))
        }
    }

    /// Revoke a proof on behalf of `caller`, who must be its creator or `owner`.
    ///
    /// Returns the revoked record.
    pub fn revoke(
        &self,
        id: &ProofId,
        caller: &ActorId,
        owner: &ActorId,
    ) -> Result<Proof, ProofError> {
        self.with_proof_mut(id, |proof| {
            if caller != &proof.creator && caller != owner {
                return Err(ProofError::Unauthorized(caller.to_string()));
            }
            if !proof.active {
                return Err(ProofError::AlreadyInactive(*id));
            }
            if !proof.status.is_revocable() {
                return Err(ProofError::AlreadyProcessed(*id));
            }
            let previous = proof.status;
            proof.revoke();
            tracing::info!(proof = %id, by = %caller, from = %previous, "proof revoked");
            Ok(proof.clone())
        })?
    }

    /// Proofs created by `creator`, in creation order.
    pub fn by_creator(&self, creator: &ActorId) -> Vec<ProofId> {
        self.index
            .read()
            .by_creator
            .get(creator)
            .cloned()
            .unwrap_or_default()
    }

    /// A window of all proof identifiers in creation order.
    ///
    /// Fails if `start` is at or beyond the end; otherwise returns at most
    /// `count` identifiers, stopping at the end.
    pub fn page(&self, start: usize, count: usize) -> Result<Vec<ProofId>, ProofError> {
        let index = self.index.read();
        let total = index.all.len();
        if start >= total {
            return Err(ProofError::OutOfRange { start, total });
        }
        let end = start.saturating_add(count).min(total);
        Ok(index.all[start..end].to_vec())
    }

    /// Every identifier, in creation order.
    pub fn ids(&self) -> Vec<ProofId> {
        self.index.read().all.clone()
    }

    /// Copies of every record, in creation order.
    pub fn records(&self) -> Vec<Proof> {
        let slots: Vec<Slot> = {
            let index = self.index.read();
            index
                .all
                .iter()
                .filter_map(|id| index.proofs.get(id).cloned())
                .collect()
        };
        slots.iter().map(|slot| slot.lock().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.index.read().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sequence number the next creation will use.
    pub fn sequence(&self) -> u64 {
        self.index.read().sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MeshGraph;
    use proofmesh_types::{Fingerprint, ProofCategory, ProofStatus};

    fn draft(creator: &str, fp: u8) -> NewProof {
        NewProof {
            creator: ActorId::new(creator),
            fingerprint: Fingerprint::new([fp; 32]),
            category: ProofCategory::Certificate,
            metadata: "ipfs://bafy".into(),
            expires_at: None,
        }
    }

    #[test]
    fn create_assigns_pending_record() {
        let store = ProofStore::new();
        let id = store.create(draft("alice", 1), Timestamp::new(10)).unwrap();
        let p = store.get(&id).unwrap();
        assert_eq!(p.status, ProofStatus::Pending);
        assert_eq!(p.created_at, Timestamp::new(10));
        assert_eq!(store.len(), 1);
        assert_eq!(store.by_creator(&ActorId::new("alice")), vec![id]);
    }

    #[test]
    fn identical_resubmission_gets_new_id() {
        let store = ProofStore::new();
        let a = store.create(draft("alice", 1), Timestamp::new(10)).unwrap();
        let b = store.create(draft("alice", 1), Timestamp::new(10)).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.sequence(), 2);
    }

    #[test]
    fn create_rejects_bad_input() {
        let store = ProofStore::new();
        let now = Timestamp::new(100);

        let zero = NewProof {
            fingerprint: Fingerprint::ZERO,
            ..draft("alice", 1)
        };
        assert!(matches!(store.create(zero, now), Err(ProofError::InvalidInput(_))));

        let empty_meta = NewProof {
            metadata: "  ".into(),
            ..draft("alice", 1)
        };
        assert!(matches!(store.create(empty_meta, now), Err(ProofError::InvalidInput(_))));

        let stale = NewProof {
            expires_at: Some(now),
            ..draft("alice", 1)
        };
        assert!(matches!(store.create(stale, now), Err(ProofError::InvalidInput(_))));

        assert!(store.is_empty());
        assert_eq!(store.sequence(), 0);
    }

    #[test]
    fn revoke_rules() {
        let store = ProofStore::new();
        let owner = ActorId::new("owner");
        let id = store.create(draft("alice", 1), Timestamp::new(1)).unwrap();

        let err = store.revoke(&id, &ActorId::new("mallory"), &owner).unwrap_err();
        assert_eq!(err, ProofError::Unauthorized("mallory".into()));

        let revoked = store.revoke(&id, &ActorId::new("alice"), &owner).unwrap();
        assert_eq!(revoked.status, ProofStatus::Revoked);
        assert!(!revoked.active);

        assert_eq!(
            store.revoke(&id, &owner, &owner).unwrap_err(),
            ProofError::AlreadyInactive(id)
        );
        let missing = ProofId::new([9; 32]);
        assert_eq!(
            store.revoke(&missing, &owner, &owner).unwrap_err(),
            ProofError::NotFound(missing)
        );
    }

    #[test]
    fn owner_may_revoke_any_proof() {
        let store = ProofStore::new();
        let owner = ActorId::new("owner");
        let id = store.create(draft("alice", 1), Timestamp::new(1)).unwrap();
        assert!(store.revoke(&id, &owner, &owner).is_ok());
    }

    #[test]
    fn rejected_proof_cannot_be_revoked() {
        let store = ProofStore::new();
        let owner = ActorId::new("owner");
        let id = store.create(draft("alice", 1), Timestamp::new(1)).unwrap();
        store.with_proof_mut(&id, |p| p.reject_expired()).unwrap();
        assert_eq!(
            store.revoke(&id, &owner, &owner).unwrap_err(),
            ProofError::AlreadyProcessed(id)
        );
    }

    #[test]
    fn pagination_bounds() {
        let store = ProofStore::new();
        let ids: Vec<ProofId> = (1..=5)
            .map(|i| store.create(draft("alice", i), Timestamp::new(1)).unwrap())
            .collect();

        assert_eq!(store.page(0, 2).unwrap(), ids[0..2].to_vec());
        assert_eq!(store.page(3, 10).unwrap(), ids[3..5].to_vec());
        assert_eq!(store.page(4, usize::MAX).unwrap(), ids[4..5].to_vec());
        assert!(store.page(2, 0).unwrap().is_empty());
        assert_eq!(
            store.page(5, 1).unwrap_err(),
            ProofError::OutOfRange { start: 5, total: 5 }
        );
    }

    #[test]
    fn empty_store_pagination_is_out_of_range() {
        let store = ProofStore::new();
        assert!(matches!(store.page(0, 1), Err(ProofError::OutOfRange { .. })));
    }

    #[test]
    fn pair_access_rejects_self_and_missing() {
        let store = ProofStore::new();
        let a = store.create(draft("alice", 1), Timestamp::new(1)).unwrap();
        let missing = ProofId::new([7; 32]);
        assert_eq!(
            store.with_pair_mut(&a, &a, |_, _| ()).unwrap_err(),
            ProofError::SelfLink(a)
        );
        assert_eq!(
            store.with_pair_mut(&a, &missing, |_, _| ()).unwrap_err(),
            ProofError::NotFound(missing)
        );
    }

    #[test]
    fn create_collision_keeps_existing_record() {
        let store = ProofStore::new();
        let a = store.create(draft("alice", 1), Timestamp::new(5)).unwrap();
        let b = store.create(draft("bob", 2), Timestamp::new(5)).unwrap();
        MeshGraph::new(&store)
            .link(&a, &b, &ActorId::new("alice"))
            .unwrap();

        // Rewinding the sequence makes the next derivation repeat `a`.
        let rewound = ProofStore::from_records(store.records(), 0).unwrap();
        let before = rewound.get(&a).unwrap();
        assert_eq!(
            rewound.create(draft("alice", 1), Timestamp::new(5)).unwrap_err(),
            ProofError::DuplicateIdentifier(a)
        );
        assert_eq!(rewound.len(), 2);
        assert_eq!(rewound.sequence(), 0);
        assert_eq!(rewound.get(&a).unwrap(), before);
        assert_eq!(rewound.get(&a).unwrap().links, vec![b]);
        assert_eq!(rewound.by_creator(&ActorId::new("alice")), vec![a]);
    }

    #[test]
    fn records_roundtrip_through_from_records() {
        let store = ProofStore::new();
        let a = store.create(draft("alice", 1), Timestamp::new(1)).unwrap();
        let b = store.create(draft("bob", 2), Timestamp::new(2)).unwrap();

        let rebuilt = ProofStore::from_records(store.records(), store.sequence()).unwrap();
        assert_eq!(rebuilt.ids(), vec![a, b]);
        assert_eq!(rebuilt.by_creator(&ActorId::new("bob")), vec![b]);
        assert_eq!(rebuilt.sequence(), 2);

        let mut dup = store.records();
        dup.push(dup[0].clone());
        assert_eq!(
            ProofStore::from_records(dup, 3).err(),
            Some(ProofError::DuplicateIdentifier(a))
        );
    }
}
