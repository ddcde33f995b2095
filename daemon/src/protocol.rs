//! Wire types for the daemon's JSON-lines command stream.
//!
//! One request object per input line, tagged by `cmd`; one response object
//! per output line, either `{"ok": ...}` or `{"error": {"kind", "message"}}`.
//! Identifiers travel as hex strings.

use proofmesh_engine::{Proof, ProofStats, VerifierInfo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    // ── Proof lifecycle ─────────────────────────────────────────────────
    Create {
        caller: String,
        fingerprint: String,
        category: String,
        #[serde(default)]
        metadata: String,
        #[serde(default)]
        expires_at: Option<u64>,
    },
    Attest {
        proof: String,
        verifier: String,
    },
    Link {
        from: String,
        to: String,
        caller: String,
    },
    Revoke {
        proof: String,
        caller: String,
    },

    // ── Verifiers ───────────────────────────────────────────────────────
    Authorize {
        caller: String,
        verifier: String,
    },
    Deauthorize {
        caller: String,
        verifier: String,
    },

    // ── Administration ──────────────────────────────────────────────────
    SetMinVerifications {
        caller: String,
        n: u32,
    },
    Pause {
        caller: String,
    },
    Resume {
        caller: String,
    },
    TransferOwnership {
        caller: String,
        new_owner: String,
    },

    // ── Queries ─────────────────────────────────────────────────────────
    GetProof {
        proof: String,
    },
    ProofVerifiers {
        proof: String,
    },
    LinkedProofs {
        proof: String,
    },
    UserProofs {
        creator: String,
    },
    IsVerified {
        proof: String,
    },
    IsValid {
        proof: String,
    },
    VerifierInfo {
        verifier: String,
    },
    AllVerifiers,
    Stats,
    ProofIds {
        start: usize,
        count: usize,
    },
    TotalProofs,
    Status,
}

#[derive(Debug, Serialize)]
pub struct ProofView {
    pub id: String,
    pub creator: String,
    pub fingerprint: String,
    pub category: String,
    pub status: String,
    pub created_at: u64,
    pub verified_at: Option<u64>,
    pub expires_at: Option<u64>,
    pub metadata: String,
    pub verifiers: Vec<String>,
    pub links: Vec<String>,
    pub active: bool,
}

impl From<Proof> for ProofView {
    fn from(p: Proof) -> Self {
        Self {
            id: p.id.to_hex(),
            creator: p.creator.to_string(),
            fingerprint: p.fingerprint.to_hex(),
            category: p.category.as_str().to_string(),
            status: p.status.as_str().to_string(),
            created_at: p.created_at.as_secs(),
            verified_at: p.verified_at.map(|t| t.as_secs()),
            expires_at: p.expires_at.map(|t| t.as_secs()),
            metadata: p.metadata,
            verifiers: p.verifiers.iter().map(ToString::to_string).collect(),
            links: p.links.iter().map(|id| id.to_hex()).collect(),
            active: p.active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttestResponse {
    pub proof: String,
    pub attestations: u32,
    pub status: String,
    pub newly_verified: bool,
    pub reputation: u64,
}

#[derive(Debug, Serialize)]
pub struct VerifierInfoResponse {
    pub authorized: bool,
    pub attestation_count: u64,
    pub reputation: u64,
    pub registered_at: Option<u64>,
}

impl From<VerifierInfo> for VerifierInfoResponse {
    fn from(info: VerifierInfo) -> Self {
        Self {
            authorized: info.authorized,
            attestation_count: info.attestation_count,
            reputation: info.reputation,
            registered_at: info.registered_at.map(|t| t.as_secs()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub owner: String,
    pub paused: bool,
    pub min_verifications: u32,
    pub total_proofs: u64,
    pub stats: ProofStats,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// A single output line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(serde_json::Value),
    Error(ErrorBody),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_parse_from_tagged_json() {
        let req: Request = serde_json::from_str(
            r#"{"cmd":"create","caller":"alice","fingerprint":"00","category":"document"}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::Create {
                caller: "alice".into(),
                fingerprint: "00".into(),
                category: "document".into(),
                metadata: String::new(),
                expires_at: None,
            }
        );

        let req: Request = serde_json::from_str(r#"{"cmd":"stats"}"#).unwrap();
        assert_eq!(req, Request::Stats);

        let req: Request =
            serde_json::from_str(r#"{"cmd":"set_min_verifications","caller":"admin","n":3}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::SetMinVerifications {
                caller: "admin".into(),
                n: 3
            }
        );
    }

    #[test]
    fn unknown_command_or_missing_field_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"cmd":"explode"}"#).is_err());
        assert!(serde_json::from_str::<Request>(r#"{"cmd":"attest","proof":"00"}"#).is_err());
    }

    #[test]
    fn response_envelope_shape() {
        let ok = serde_json::to_string(&Response::Ok(serde_json::json!(true))).unwrap();
        assert_eq!(ok, r#"{"ok":true}"#);
        let err = serde_json::to_string(&Response::Error(ErrorBody {
            kind: "not_found".into(),
            message: "missing".into(),
        }))
        .unwrap();
        assert_eq!(err, r#"{"error":{"kind":"not_found","message":"missing"}}"#);
    }
}
