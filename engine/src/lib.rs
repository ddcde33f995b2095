//! The ProofMesh engine.
//!
//! Entities register content fingerprints ("proofs"); an authorized set of
//! independent verifiers attests to them; once enough distinct attestations
//! accumulate a proof becomes `Verified`. Proofs can be linked pairwise into a
//! mesh of related evidence.
//!
//! [`ProofMesh`] is the single authoritative state machine: every mutating
//! call is atomic and serializable with respect to every other, and calls on
//! different proofs run in parallel.

pub mod admin;
pub mod config;
pub mod error;
pub mod events;
pub mod mesh;
pub mod snapshot;
pub mod spans;
pub mod verification;

pub use admin::AdminControl;
pub use config::MeshConfig;
pub use error::{ConfigError, ErrorKind, MeshError};
pub use events::{EventBus, MeshEvent};
pub use mesh::ProofMesh;
pub use snapshot::MeshSnapshot;
pub use verification::{AttestOutcome, VerificationEngine};

pub use proofmesh_proofs::{Proof, ProofStats};
pub use proofmesh_registry::VerifierInfo;
