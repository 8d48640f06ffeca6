//! Member address type with `agr_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An AGORA member address, always prefixed with `agr_`.
///
/// Addresses are opaque identities issued by the authentication boundary;
/// the engine only checks their shape, never their provenance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberAddress(String);

impl MemberAddress {
    /// The standard prefix for all AGORA member addresses.
    pub const PREFIX: &'static str = "agr_";

    /// Create a new member address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `agr_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with agr_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    ///
    /// A bare prefix with no identity part is the "null address" shape and
    /// is rejected wherever an address is taken as input (e.g. delegates).
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for MemberAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MemberAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        let a = MemberAddress::new("agr_alice");
        assert!(a.is_valid());
        assert_eq!(a.as_str(), "agr_alice");
    }

    #[test]
    fn test_bare_prefix_is_invalid() {
        let a = MemberAddress::new("agr_");
        assert!(!a.is_valid());
    }

    #[test]
    #[should_panic]
    fn test_wrong_prefix_panics() {
        MemberAddress::new("usr_alice");
    }
}
