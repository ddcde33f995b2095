//! 256-bit identifiers: proof identifiers and submitted content fingerprints.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn decode_32(s: &str) -> Result<[u8; 32], ParseError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| ParseError::InvalidLength {
        expected: 32,
        actual,
    })
}

macro_rules! hash32 {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Parse from a 64-character hex string (optional `0x` prefix).
            pub fn from_hex(s: &str) -> Result<Self, ParseError> {
                decode_32(s).map(Self)
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({}\u{2026})"), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }
    };
}

hash32! {
    /// A proof identifier, derived from the submitted fingerprint, the creator,
    /// the creation time and a global sequence number. Unique for the lifetime
    /// of the engine and immutable once assigned.
    ProofId
}

hash32! {
    /// The caller-supplied content fingerprint (e.g. a SHA-256 of a document).
    /// The engine never interprets it beyond rejecting the all-zero value.
    Fingerprint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_with_and_without_prefix() {
        let id = ProofId::new([0xab; 32]);
        let text = id.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(ProofId::from_hex(&text).unwrap(), id);
        assert_eq!(ProofId::from_hex(&format!("0x{text}")).unwrap(), id);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            Fingerprint::from_hex("abcd"),
            Err(ParseError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
        assert!(matches!(
            Fingerprint::from_hex("zz"),
            Err(ParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn ordering_follows_bytes() {
        let mut low = [0u8; 32];
        low[31] = 1;
        let mut high = [0u8; 32];
        high[0] = 1;
        assert!(ProofId::new(low) < ProofId::new(high));
        assert!(ProofId::ZERO.is_zero());
    }
}
