//! Verifier records.

use proofmesh_types::{ActorId, Timestamp};
use serde::{Deserialize, Serialize};

/// A verifier record. Created on first authorization, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifier {
    pub actor: ActorId,
    /// Whether the actor may currently attest.
    pub authorized: bool,
    /// Successful attestations over the record's whole lifetime.
    pub attestation_count: u64,
    pub reputation: u64,
    /// When the most recent authorization was granted.
    pub registered_at: Timestamp,
}

/// Read-only view of a verifier, as returned to callers.
///
/// Unknown actors get the zero-valued, unauthorized view rather than an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierInfo {
    pub authorized: bool,
    pub attestation_count: u64,
    pub reputation: u64,
    pub registered_at: Option<Timestamp>,
}

impl From<&Verifier> for VerifierInfo {
    fn from(v: &Verifier) -> Self {
        Self {
            authorized: v.authorized,
            attestation_count: v.attestation_count,
            reputation: v.reputation,
            registered_at: Some(v.registered_at),
        }
    }
}
