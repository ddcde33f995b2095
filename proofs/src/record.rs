//! The proof record.

use proofmesh_types::{ActorId, Fingerprint, ProofCategory, ProofId, ProofStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Caller-supplied fields of a proof about to be created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProof {
    pub creator: ActorId,
    pub fingerprint: Fingerprint,
    pub category: ProofCategory,
    /// Opaque external reference (e.g. a content address). Must be non-empty.
    pub metadata: String,
    /// `None` means the proof never expires.
    pub expires_at: Option<Timestamp>,
}

/// A registered proof.
///
/// `id`, `creator`, `fingerprint`, `category`, `created_at`, `expires_at` and
/// `metadata` never change after creation. `verifiers` and `links` only grow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub id: ProofId,
    pub creator: ActorId,
    pub fingerprint: Fingerprint,
    pub category: ProofCategory,
    pub status: ProofStatus,
    pub created_at: Timestamp,
    /// Set once, when the proof first reaches `Verified`.
    pub verified_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub metadata: String,
    /// Distinct verifiers that attested, in attestation order.
    pub verifiers: Vec<ActorId>,
    /// Linked proofs, in link order. May repeat.
    pub links: Vec<ProofId>,
    /// Cleared on revocation; an inactive proof accepts no further
    /// attestation or revocation.
    pub active: bool,
}

impl Proof {
    pub(crate) fn new(id: ProofId, draft: NewProof, now: Timestamp) -> Self {
        Self {
            id,
            creator: draft.creator,
            fingerprint: draft.fingerprint,
            category: draft.category,
            status: ProofStatus::Pending,
            created_at: now,
            verified_at: None,
            expires_at: draft.expires_at,
            metadata: draft.metadata,
            verifiers: Vec::new(),
            links: Vec::new(),
            active: true,
        }
    }

    pub fn has_attested(&self, verifier: &ActorId) -> bool {
        self.verifiers.contains(verifier)
    }

    pub fn attestation_count(&self) -> u32 {
        self.verifiers.len() as u32
    }

    /// Whether the expiry deadline (if any) has passed at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|t| t.has_passed(now))
    }

    /// Active, verified and not expired.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        self.active && self.status == ProofStatus::Verified && !self.is_expired(now)
    }

    /// Append an attestation; flips to `Verified` once `threshold` distinct
    /// verifiers have attested. Returns `true` if this call caused the flip.
    ///
    /// The caller has already checked that the proof is active, pending and
    /// not yet attested by `verifier`.
    pub fn push_attestation(&mut self, verifier: ActorId, threshold: u32, now: Timestamp) -> bool {
        debug_assert!(!self.has_attested(&verifier));
        self.verifiers.push(verifier);
        if self.status == ProofStatus::Pending && self.attestation_count() >= threshold {
            self.status = ProofStatus::Verified;
            self.verified_at = Some(now);
            return true;
        }
        false
    }

    /// Pending → Rejected on expiry.
    pub fn reject_expired(&mut self) {
        if self.status == ProofStatus::Pending {
            self.status = ProofStatus::Rejected;
        }
    }

    pub(crate) fn revoke(&mut self) {
        self.status = ProofStatus::Revoked;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expires_at: Option<Timestamp>) -> Proof {
        Proof::new(
            ProofId::new([1; 32]),
            NewProof {
                creator: ActorId::new("alice"),
                fingerprint: Fingerprint::new([2; 32]),
                category: ProofCategory::Document,
                metadata: "ipfs://doc".into(),
                expires_at,
            },
            Timestamp::new(100),
        )
    }

    #[test]
    fn new_proof_is_pending_and_active() {
        let p = sample(None);
        assert_eq!(p.status, ProofStatus::Pending);
        assert!(p.active);
        assert!(p.verified_at.is_none());
        assert!(!p.is_valid(Timestamp::new(100)));
    }

    #[test]
    fn threshold_flip_happens_once() {
        let mut p = sample(None);
        assert!(!p.push_attestation(ActorId::new("v1"), 2, Timestamp::new(101)));
        assert_eq!(p.status, ProofStatus::Pending);
        assert!(p.push_attestation(ActorId::new("v2"), 2, Timestamp::new(102)));
        assert_eq!(p.status, ProofStatus::Verified);
        assert_eq!(p.verified_at, Some(Timestamp::new(102)));
        assert!(p.is_valid(Timestamp::new(200)));
    }

    #[test]
    fn expiry_is_exclusive_of_the_deadline() {
        let p = sample(Some(Timestamp::new(150)));
        assert!(!p.is_expired(Timestamp::new(150)));
        assert!(p.is_expired(Timestamp::new(151)));
    }

    #[test]
    fn reject_only_from_pending() {
        let mut p = sample(None);
        p.push_attestation(ActorId::new("v1"), 1, Timestamp::new(101));
        p.reject_expired();
        assert_eq!(p.status, ProofStatus::Verified);

        let mut q = sample(None);
        q.reject_expired();
        assert_eq!(q.status, ProofStatus::Rejected);
        assert!(q.active);
    }
}
