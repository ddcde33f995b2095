//! Proof identifier derivation.

use crate::hash::blake2b_256_multi;
use proofmesh_types::{ActorId, Fingerprint, ProofId, Timestamp};

const DOMAIN: &[u8] = b"proofmesh/proof-id/v1";

/// Derive the identifier for a newly created proof.
///
/// The sequence number is global and strictly increasing, so resubmitting the
/// same fingerprint from the same creator within the same second still yields
/// a fresh identifier. The creator string is length-prefixed so that adjacent
/// fields cannot be shifted into each other.
pub fn derive_proof_id(
    fingerprint: &Fingerprint,
    creator: &ActorId,
    created_at: Timestamp,
    sequence: u64,
) -> ProofId {
    let creator = creator.as_str().as_bytes();
    let creator_len = (creator.len() as u64).to_le_bytes();
    ProofId::new(blake2b_256_multi(&[
        DOMAIN,
        fingerprint.as_bytes(),
        &creator_len,
        creator,
        &created_at.as_secs().to_le_bytes(),
        &sequence.to_le_bytes(),
    ]))
}
