//! Proof category and lifecycle status.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of thing a proof vouches for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofCategory {
    Document,
    Asset,
    Identity,
    Claim,
    Certificate,
}

impl ProofCategory {
    pub const ALL: [ProofCategory; 5] = [
        Self::Document,
        Self::Asset,
        Self::Identity,
        Self::Claim,
        Self::Certificate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Asset => "asset",
            Self::Identity => "identity",
            Self::Claim => "claim",
            Self::Certificate => "certificate",
        }
    }
}

impl fmt::Display for ProofCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProofCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// Lifecycle status of a proof.
///
/// ```text
/// Pending --[threshold met]----------> Verified
/// Pending --[expired at attest time]--> Rejected
/// {Pending, Verified} --[revoke]-----> Revoked
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofStatus {
    /// Collecting attestations.
    Pending,
    /// Reached the attestation threshold.
    Verified,
    /// Expired before reaching the threshold.
    Rejected,
    /// Withdrawn by its creator or the owner.
    Revoked,
}

impl ProofStatus {
    /// Whether the proof still accepts attestations.
    pub fn accepts_attestations(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether an explicit revocation may move the proof to `Revoked`.
    pub fn is_revocable(&self) -> bool {
        matches!(self, Self::Pending | Self::Verified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Document".parse::<ProofCategory>(), Ok(ProofCategory::Document));
        assert_eq!("CERTIFICATE".parse::<ProofCategory>(), Ok(ProofCategory::Certificate));
        assert!("diploma".parse::<ProofCategory>().is_err());
    }

    #[test]
    fn only_pending_accepts_attestations() {
        assert!(ProofStatus::Pending.accepts_attestations());
        assert!(!ProofStatus::Verified.accepts_attestations());
        assert!(!ProofStatus::Rejected.accepts_attestations());
        assert!(!ProofStatus::Revoked.accepts_attestations());
    }

    #[test]
    fn rejected_and_revoked_are_not_revocable() {
        assert!(ProofStatus::Pending.is_revocable());
        assert!(ProofStatus::Verified.is_revocable());
        assert!(!ProofStatus::Rejected.is_revocable());
        assert!(!ProofStatus::Revoked.is_revocable());
    }
}
