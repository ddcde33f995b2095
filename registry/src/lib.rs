//! Verifier registry.
//!
//! Tracks every actor that has ever been granted the verifier role, whether the
//! grant is currently active, and the attestation count and reputation each
//! verifier has accumulated. Records are never deleted: de-authorization only
//! flips a flag, so history survives a later re-authorization.

pub mod error;
pub mod registry;
pub mod verifier;

pub use error::RegistryError;
pub use registry::VerifierRegistry;
pub use verifier::{Verifier, VerifierInfo};
