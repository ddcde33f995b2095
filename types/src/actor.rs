//! Actor identity — anyone who creates, attests, links or administers proofs.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque actor identity.
///
/// Key management and authentication happen outside the engine; by the time a
/// call reaches the engine the caller identity is already established, so this
/// is just a validated, non-empty string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty. Use [`ActorId::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(!s.is_empty(), "actor identity must not be empty");
        Self(s)
    }

    /// Parse an actor identity, rejecting empty or whitespace-only input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ParseError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(ParseError::EmptyActor);
        }
        Ok(Self(s))
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActorId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActorId {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<ActorId> for String {
    fn from(actor: ActorId) -> Self {
        actor.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(ActorId::parse(""), Err(ParseError::EmptyActor));
        assert_eq!(ActorId::parse("   "), Err(ParseError::EmptyActor));
    }

    #[test]
    fn serde_rejects_empty_identity() {
        let parsed: Result<ActorId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let ok: ActorId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(ok.as_str(), "alice");
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn new_panics_on_empty() {
        let _ = ActorId::new("");
    }
}
