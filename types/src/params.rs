//! Policy parameters consumed by the verification engine.

use serde::{Deserialize, Serialize};

/// Starting reputation for a freshly authorized verifier.
pub const DEFAULT_INITIAL_REPUTATION: u64 = 100;

/// Reputation earned per successful attestation.
pub const DEFAULT_REPUTATION_INCREMENT: u64 = 10;

/// Policy parameters held by the administrative control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshParams {
    /// Distinct attestations required to move a proof to `Verified`. Always >= 1.
    pub min_verifications: u32,

    /// Reputation assigned (or reset to) on authorization.
    pub initial_reputation: u64,

    /// Reputation added per successful attestation.
    pub reputation_increment: u64,

    /// Reserved policy parameter. Stored and reported, not enforced.
    pub reputation_threshold: u64,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            min_verifications: 1,
            initial_reputation: DEFAULT_INITIAL_REPUTATION,
            reputation_increment: DEFAULT_REPUTATION_INCREMENT,
            reputation_threshold: 0,
        }
    }
}
