use proofmesh_proofs::ProofError;
use proofmesh_registry::RegistryError;
use proofmesh_types::ProofId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every failure an engine operation can report.
///
/// All variants leave committed state untouched, with one exception:
/// [`MeshError::Expired`] is returned *after* the proof has been moved to
/// `Rejected`, and that transition stays committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("system is paused")]
    SystemPaused,

    #[error("{actor} is not permitted to {action}")]
    Unauthorized { actor: String, action: &'static str },

    #[error("verifier {verifier} has already attested proof {proof}")]
    DuplicateAttestation { proof: ProofId, verifier: String },

    #[error("proof {0} is no longer pending")]
    AlreadyProcessed(ProofId),

    #[error("proof {0} has expired and was rejected")]
    Expired(ProofId),

    #[error("proof {0} is inactive")]
    Inactive(ProofId),

    #[error("minimum verification threshold must be at least 1")]
    InvalidThreshold,

    #[error("snapshot is corrupt: {0}")]
    CorruptSnapshot(String),
}

/// Stable, machine-readable error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    InvalidInput,
    DuplicateAttestation,
    AlreadyProcessed,
    Expired,
    Inactive,
    AlreadyInactive,
    AlreadyAuthorized,
    NotAuthorized,
    SystemPaused,
    OutOfRange,
    SelfLink,
    DuplicateIdentifier,
    CorruptSnapshot,
}

impl MeshError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Proof(e) => match e {
                ProofError::NotFound(_) => ErrorKind::NotFound,
                ProofError::InvalidInput(_) => ErrorKind::InvalidInput,
                ProofError::DuplicateIdentifier(_) => ErrorKind::DuplicateIdentifier,
                ProofError::Unauthorized(_) => ErrorKind::Unauthorized,
                ProofError::AlreadyInactive(_) => ErrorKind::AlreadyInactive,
                ProofError::AlreadyProcessed(_) => ErrorKind::AlreadyProcessed,
                ProofError::OutOfRange { .. } => ErrorKind::OutOfRange,
                ProofError::SelfLink(_) => ErrorKind::SelfLink,
            },
            Self::Registry(e) => match e {
                RegistryError::AlreadyAuthorized(_) => ErrorKind::AlreadyAuthorized,
                RegistryError::NotAuthorized(_) => ErrorKind::NotAuthorized,
                RegistryError::DuplicateRecord(_) => ErrorKind::CorruptSnapshot,
            },
            Self::SystemPaused => ErrorKind::SystemPaused,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::DuplicateAttestation { .. } => ErrorKind::DuplicateAttestation,
            Self::AlreadyProcessed(_) => ErrorKind::AlreadyProcessed,
            Self::Expired(_) => ErrorKind::Expired,
            Self::Inactive(_) => ErrorKind::Inactive,
            Self::InvalidThreshold => ErrorKind::InvalidInput,
            Self::CorruptSnapshot(_) => ErrorKind::CorruptSnapshot,
        }
    }
}

/// Failure to load a [`crate::MeshConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_wrapped_error() {
        let id = ProofId::new([1; 32]);
        assert_eq!(MeshError::from(ProofError::NotFound(id)).kind(), ErrorKind::NotFound);
        assert_eq!(
            MeshError::from(RegistryError::NotAuthorized("v".into())).kind(),
            ErrorKind::NotAuthorized
        );
        assert_eq!(MeshError::InvalidThreshold.kind(), ErrorKind::InvalidInput);
        assert_eq!(MeshError::Expired(id).kind(), ErrorKind::Expired);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::DuplicateAttestation).unwrap();
        assert_eq!(json, "\"duplicate_attestation\"");
    }
}
