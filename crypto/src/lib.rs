//! Hashing primitives for ProofMesh.
//!
//! - **Blake2b-256** for every digest in the system
//! - Proof identifier derivation from fingerprint, creator, time and sequence

pub mod hash;
pub mod proof_id;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use proof_id::derive_proof_id;
