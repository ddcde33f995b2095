use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("verifier {0} is already authorized")]
    AlreadyAuthorized(String),

    #[error("verifier {0} is not authorized")]
    NotAuthorized(String),

    #[error("duplicate verifier record for {0}")]
    DuplicateRecord(String),
}
