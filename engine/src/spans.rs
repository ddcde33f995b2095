//! Pre-built [`tracing::Span`] constructors for engine operations.
//!
//! Consistent span names and field sets make it easy to filter and correlate
//! traces per proof or per actor.

use proofmesh_types::{ActorId, ProofId};
use tracing::{info_span, Span};

pub fn create_span(creator: &ActorId) -> Span {
    info_span!("create_proof", creator = %creator)
}

pub fn attest_span(proof: &ProofId, verifier: &ActorId) -> Span {
    info_span!("attest", proof = %proof, verifier = %verifier)
}

pub fn link_span(a: &ProofId, b: &ProofId) -> Span {
    info_span!("link", a = %a, b = %b)
}

pub fn revoke_span(proof: &ProofId, caller: &ActorId) -> Span {
    info_span!("revoke", proof = %proof, caller = %caller)
}

pub fn admin_span(action: &'static str, caller: &ActorId) -> Span {
    info_span!("admin", action, caller = %caller)
}
