//! Engine snapshots — capture the full engine state at a point in time.
//!
//! A snapshot lets a host checkpoint the engine and rebuild it later (or on
//! another replica) without replaying every call. The hash is computed
//! deterministically from the captured state so a restoring host can detect
//! corruption.

use crate::error::MeshError;
use proofmesh_crypto::blake2b_256;
use proofmesh_proofs::Proof;
use proofmesh_registry::Verifier;
use proofmesh_types::{ActorId, MeshParams, Timestamp};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Full engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    /// Blake2b-256 of the bincode encoding of every other field.
    pub hash: [u8; 32],
    pub version: u32,
    pub taken_at: Timestamp,
    pub owner: ActorId,
    pub params: MeshParams,
    pub paused: bool,
    /// Next identifier-derivation sequence number.
    pub sequence: u64,
    /// Proofs in creation order.
    pub proofs: Vec<Proof>,
    /// Verifiers in first-authorization order.
    pub verifiers: Vec<Verifier>,
}

#[derive(Serialize)]
struct HashedFields<'a> {
    version: u32,
    taken_at: Timestamp,
    owner: &'a ActorId,
    params: &'a MeshParams,
    paused: bool,
    sequence: u64,
    proofs: &'a [Proof],
    verifiers: &'a [Verifier],
}

impl MeshSnapshot {
    pub(crate) fn create(
        taken_at: Timestamp,
        owner: ActorId,
        params: MeshParams,
        paused: bool,
        sequence: u64,
        proofs: Vec<Proof>,
        verifiers: Vec<Verifier>,
    ) -> Result<Self, MeshError> {
        let mut snap = Self {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            taken_at,
            owner,
            params,
            paused,
            sequence,
            proofs,
            verifiers,
        };
        snap.hash = snap.compute_hash()?;
        Ok(snap)
    }

    fn compute_hash(&self) -> Result<[u8; 32], MeshError> {
        let fields = HashedFields {
            version: self.version,
            taken_at: self.taken_at,
            owner: &self.owner,
            params: &self.params,
            paused: self.paused,
            sequence: self.sequence,
            proofs: &self.proofs,
            verifiers: &self.verifiers,
        };
        let bytes =
            bincode::serialize(&fields).map_err(|e| MeshError::CorruptSnapshot(e.to_string()))?;
        Ok(blake2b_256(&bytes))
    }

    /// Check the version and that the stored hash matches the contents.
    pub fn verify(&self) -> Result<(), MeshError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(MeshError::CorruptSnapshot(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        if self.compute_hash()? != self.hash {
            return Err(MeshError::CorruptSnapshot("hash mismatch".into()));
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MeshError> {
        bincode::serialize(self).map_err(|e| MeshError::CorruptSnapshot(e.to_string()))
    }

    /// Decode and verify a snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MeshError> {
        let snap: Self =
            bincode::deserialize(bytes).map_err(|e| MeshError::CorruptSnapshot(e.to_string()))?;
        snap.verify()?;
        Ok(snap)
    }
}
