use proofmesh_types::ProofId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("proof {0} not found")]
    NotFound(ProofId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("identifier collision on {0}")]
    DuplicateIdentifier(ProofId),

    #[error("{0} is not permitted to perform this action")]
    Unauthorized(String),

    #[error("proof {0} is no longer active")]
    AlreadyInactive(ProofId),

    #[error("proof {0} has already been processed")]
    AlreadyProcessed(ProofId),

    #[error("offset {start} is out of range (total {total})")]
    OutOfRange { start: usize, total: usize },

    #[error("proof {0} cannot be linked to itself")]
    SelfLink(ProofId),
}
