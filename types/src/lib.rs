//! Fundamental types for ProofMesh.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! actor identities, proof identifiers and fingerprints, timestamps and clocks,
//! policy parameters, and the proof lifecycle enums.

pub mod actor;
pub mod error;
pub mod hash;
pub mod params;
pub mod state;
pub mod time;

pub use actor::ActorId;
pub use error::ParseError;
pub use hash::{Fingerprint, ProofId};
pub use params::MeshParams;
pub use state::{ProofCategory, ProofStatus};
pub use time::{Clock, SystemClock, Timestamp};
