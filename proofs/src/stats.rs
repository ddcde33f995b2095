//! Aggregate proof statistics.

use crate::store::ProofStore;
use proofmesh_types::ProofStatus;
use serde::{Deserialize, Serialize};

/// Counts by lifecycle status. `total` includes rejected proofs, which fall
/// into none of the three buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    pub revoked: u64,
}

/// Read-side view over a [`ProofStore`]. Holds no state of its own.
pub struct StatsAggregator<'a> {
    store: &'a ProofStore,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(store: &'a ProofStore) -> Self {
        Self { store }
    }

    /// Full scan over every proof. O(total proofs).
    pub fn snapshot(&self) -> ProofStats {
        let ids = self.store.ids();
        let mut stats = ProofStats {
            total: ids.len() as u64,
            ..ProofStats::default()
        };
        for id in &ids {
            let Ok(status) = self.store.with_proof(id, |p| p.status) else {
                continue;
            };
            match status {
                ProofStatus::Pending => stats.pending += 1,
                ProofStatus::Verified => stats.verified += 1,
                ProofStatus::Revoked => stats.revoked += 1,
                ProofStatus::Rejected => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewProof;
    use proofmesh_types::{ActorId, Fingerprint, ProofCategory, Timestamp};

    #[test]
    fn rejected_counts_in_total_only() {
        let store = ProofStore::new();
        let owner = ActorId::new("owner");
        let mut ids = Vec::new();
        for fp in 1..=4u8 {
            ids.push(
                store
                    .create(
                        NewProof {
                            creator: ActorId::new("alice"),
                            fingerprint: Fingerprint::new([fp; 32]),
                            category: ProofCategory::Claim,
                            metadata: "ref".into(),
                            expires_at: None,
                        },
                        Timestamp::new(1),
                    )
                    .unwrap(),
            );
        }
        store
            .with_proof_mut(&ids[0], |p| {
                p.push_attestation(ActorId::new("v1"), 1, Timestamp::new(2));
            })
            .unwrap();
        store.with_proof_mut(&ids[1], |p| p.reject_expired()).unwrap();
        store.revoke(&ids[2], &owner, &owner).unwrap();

        let stats = StatsAggregator::new(&store).snapshot();
        assert_eq!(
            stats,
            ProofStats {
                total: 4,
                verified: 1,
                pending: 1,
                revoked: 1,
            }
        );
    }

    #[test]
    fn empty_store_is_all_zero() {
        let store = ProofStore::new();
        assert_eq!(StatsAggregator::new(&store).snapshot(), ProofStats::default());
    }
}
