//! Chain primitives
//!
//! Strongly typed wrappers around the raw values the injected provider
//! hands back, so an account address can never be mixed up with a
//! contract address string or a network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AgoranetError;

/// Smallest-unit integer amount (wei for the native currency, cogs for
/// the marketplace token). Non-negative by construction.
pub type TokenUnits = u128;

/// A 20-byte account or contract address, stored 0x-prefixed and
/// lowercase-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address string.
    pub fn parse(s: &str) -> Result<Self, AgoranetError> {
        let body = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(body).map_err(|_| AgoranetError::InvalidAddress {
            value: s.to_string(),
        })?;
        if decoded.len() != 20 {
            return Err(AgoranetError::InvalidAddress {
                value: s.to_string(),
            });
        }
        Ok(Self(format!("0x{}", body.to_lowercase())))
    }

    /// The 0x-prefixed lowercase hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque network identifier as reported by the provider (a decimal
/// string, e.g. "1" for mainnet). Compared only for equality; never
/// interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(String);

impl NetworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_normalizes_case() {
        let a = Address::parse("0xABDD6525BC4012b07a3a3758070c676FAd70869B").unwrap();
        assert_eq!(a.as_str(), "0xabdd6525bc4012b07a3a3758070c676fad70869b");
    }

    #[test]
    fn address_accepts_unprefixed() {
        let a = Address::parse("abdd6525bc4012b07a3a3758070c676fad70869b").unwrap();
        assert_eq!(a.as_str(), "0xabdd6525bc4012b07a3a3758070c676fad70869b");
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert!(Address::parse("0x1234").is_err());
    }

    #[test]
    fn address_rejects_non_hex() {
        assert!(Address::parse("0xzzdd6525bc4012b07a3a3758070c676fad70869b").is_err());
    }
}
