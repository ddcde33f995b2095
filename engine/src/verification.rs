//! Verification engine — the attestation protocol.
//!
//! The engine works on an already-locked proof and registry; making the whole
//! step atomic is the caller's job (see [`crate::ProofMesh::attest`]).

use crate::error::MeshError;
use proofmesh_proofs::Proof;
use proofmesh_registry::VerifierRegistry;
use proofmesh_types::{ActorId, MeshParams, ProofId, ProofStatus, Timestamp};

/// Result of a successful attestation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttestOutcome {
    pub proof: ProofId,
    /// Attestations on the proof after this one.
    pub attestations: u32,
    /// Status after this attestation.
    pub status: ProofStatus,
    /// Whether this attestation is the one that crossed the threshold.
    pub newly_verified: bool,
    /// Verifier reputation after the increment.
    pub reputation: u64,
}

pub struct VerificationEngine;

impl VerificationEngine {
    /// Record `verifier`'s attestation of `proof`.
    ///
    /// Checks run in a fixed order: authorization, duplicate, active, pending,
    /// expiry. An expired pending proof is moved to `Rejected` and the call
    /// then fails with [`MeshError::Expired`]; that transition is *not* rolled
    /// back.
    pub fn attest(
        &self,
        proof: &mut Proof,
        registry: &mut VerifierRegistry,
        params: &MeshParams,
        verifier: &ActorId,
        now: Timestamp,
    ) -> Result<AttestOutcome, MeshError> {
        if !registry.is_authorized(verifier) {
            tracing::debug!(proof = %proof.id, verifier = %verifier, "attestation from unauthorized actor");
            return Err(MeshError::Unauthorized {
                actor: verifier.to_string(),
                action: "attest proofs",
            });
        }
        if proof.has_attested(verifier) {
            return Err(MeshError::DuplicateAttestation {
                proof: proof.id,
                verifier: verifier.to_string(),
            });
        }
        if !proof.active {
            return Err(MeshError::Inactive(proof.id));
        }
        if !proof.status.accepts_attestations() {
            return Err(MeshError::AlreadyProcessed(proof.id));
        }
        if proof.is_expired(now) {
            proof.reject_expired();
            tracing::warn!(
                proof = %proof.id,
                verifier = %verifier,
                expired_at = ?proof.expires_at,
                "proof expired before reaching threshold; rejected"
            );
            return Err(MeshError::Expired(proof.id));
        }

        let record = registry.record_attestation(verifier, params.reputation_increment)?;
        let reputation = record.reputation;
        let newly_verified =
            proof.push_attestation(verifier.clone(), params.min_verifications, now);

        if newly_verified {
            tracing::info!(
                proof = %proof.id,
                attestations = proof.attestation_count(),
                "proof verified"
            );
        } else {
            tracing::debug!(
                proof = %proof.id,
                verifier = %verifier,
                attestations = proof.attestation_count(),
                "attestation recorded"
            );
        }

        Ok(AttestOutcome {
            proof: proof.id,
            attestations: proof.attestation_count(),
            status: proof.status,
            newly_verified,
            reputation,
        })
    }
}
