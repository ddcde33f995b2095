//! Maps decoded requests onto engine calls.

use crate::protocol::{
    AttestResponse, ErrorBody, ProofView, Request, Response, StatusResponse, VerifierInfoResponse,
};
use proofmesh_engine::{ErrorKind, MeshError, ProofMesh};
use proofmesh_types::{ActorId, Fingerprint, ParseError, ProofCategory, ProofId, Timestamp};
use proofmesh_utils::format_duration;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    Argument(#[from] ParseError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl CommandError {
    /// Stable error code reported to the client.
    pub fn kind(&self) -> String {
        match self {
            Self::Malformed(_) => "malformed_request".into(),
            Self::Argument(_) => "invalid_input".into(),
            Self::Mesh(e) => kind_name(e.kind()),
        }
    }
}

fn kind_name(kind: ErrorKind) -> String {
    match serde_json::to_value(kind) {
        Ok(Value::String(s)) => s,
        _ => format!("{kind:?}"),
    }
}

fn actor(raw: &str) -> Result<ActorId, CommandError> {
    Ok(ActorId::parse(raw)?)
}

fn proof_id(raw: &str) -> Result<ProofId, CommandError> {
    Ok(ProofId::from_hex(raw)?)
}

fn to_value(v: impl Serialize) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(v)?)
}

fn hex_ids(ids: Vec<ProofId>) -> Value {
    json!(ids.iter().map(ProofId::to_hex).collect::<Vec<_>>())
}

/// Execute one request against the engine.
pub fn execute(mesh: &ProofMesh, request: Request) -> Result<Value, CommandError> {
    match request {
        Request::Create {
            caller,
            fingerprint,
            category,
            metadata,
            expires_at,
        } => {
            let expires_at = expires_at.map(Timestamp::new);
            let id = mesh.create_proof(
                &actor(&caller)?,
                Fingerprint::from_hex(&fingerprint)?,
                category.parse::<ProofCategory>()?,
                metadata,
                expires_at,
            )?;
            if let Some(deadline) = expires_at {
                let remaining = mesh.now().remaining_until(deadline);
                tracing::debug!(proof = %id, expires_in = %format_duration(remaining), "proof expiry scheduled");
            }
            Ok(json!({ "proof": id.to_hex() }))
        }
        Request::Attest { proof, verifier } => {
            let outcome = mesh.attest(&proof_id(&proof)?, &actor(&verifier)?)?;
            to_value(AttestResponse {
                proof: outcome.proof.to_hex(),
                attestations: outcome.attestations,
                status: outcome.status.as_str().to_string(),
                newly_verified: outcome.newly_verified,
                reputation: outcome.reputation,
            })
        }
        Request::Link { from, to, caller } => {
            mesh.link(&proof_id(&from)?, &proof_id(&to)?, &actor(&caller)?)?;
            Ok(Value::Null)
        }
        Request::Revoke { proof, caller } => {
            mesh.revoke(&proof_id(&proof)?, &actor(&caller)?)?;
            Ok(Value::Null)
        }

        Request::Authorize { caller, verifier } => {
            mesh.authorize_verifier(&actor(&caller)?, &actor(&verifier)?)?;
            Ok(Value::Null)
        }
        Request::Deauthorize { caller, verifier } => {
            mesh.deauthorize_verifier(&actor(&caller)?, &actor(&verifier)?)?;
            Ok(Value::Null)
        }

        Request::SetMinVerifications { caller, n } => {
            mesh.set_min_verifications(&actor(&caller)?, n)?;
            Ok(Value::Null)
        }
        Request::Pause { caller } => {
            mesh.pause(&actor(&caller)?)?;
            Ok(Value::Null)
        }
        Request::Resume { caller } => {
            mesh.resume(&actor(&caller)?)?;
            Ok(Value::Null)
        }
        Request::TransferOwnership { caller, new_owner } => {
            mesh.transfer_ownership(&actor(&caller)?, actor(&new_owner)?)?;
            Ok(Value::Null)
        }

        Request::GetProof { proof } => to_value(ProofView::from(mesh.proof(&proof_id(&proof)?)?)),
        Request::ProofVerifiers { proof } => {
            let verifiers = mesh.proof_verifiers(&proof_id(&proof)?)?;
            Ok(json!(verifiers.iter().map(ActorId::as_str).collect::<Vec<_>>()))
        }
        Request::LinkedProofs { proof } => Ok(hex_ids(mesh.linked_proofs(&proof_id(&proof)?)?)),
        Request::UserProofs { creator } => Ok(hex_ids(mesh.user_proofs(&actor(&creator)?))),
        Request::IsVerified { proof } => Ok(json!(mesh.is_verified(&proof_id(&proof)?)?)),
        Request::IsValid { proof } => Ok(json!(mesh.is_valid(&proof_id(&proof)?)?)),
        Request::VerifierInfo { verifier } => to_value(VerifierInfoResponse::from(
            mesh.verifier_info(&actor(&verifier)?),
        )),
        Request::AllVerifiers => {
            let all = mesh.all_verifiers();
            Ok(json!(all.iter().map(ActorId::as_str).collect::<Vec<_>>()))
        }
        Request::Stats => to_value(mesh.stats()),
        Request::ProofIds { start, count } => Ok(hex_ids(mesh.proof_ids(start, count)?)),
        Request::TotalProofs => Ok(json!(mesh.total_proofs())),
        Request::Status => to_value(StatusResponse {
            owner: mesh.owner().to_string(),
            paused: mesh.is_paused(),
            min_verifications: mesh.params().min_verifications,
            total_proofs: mesh.total_proofs(),
            stats: mesh.stats(),
        }),
    }
}

/// Decode one input line, execute it, and encode the reply line.
pub fn handle_line(mesh: &ProofMesh, line: &str) -> String {
    let result = serde_json::from_str::<Request>(line)
        .map_err(CommandError::from)
        .and_then(|request| execute(mesh, request));

    let response = match result {
        Ok(value) => Response::Ok(value),
        Err(e) => {
            tracing::debug!(kind = %e.kind(), error = %e, "command failed");
            Response::Error(ErrorBody {
                kind: e.kind(),
                message: e.to_string(),
            })
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"error":{{"kind":"internal","message":"{e}"}}}}"#)
    })
}
