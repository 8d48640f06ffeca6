//! Error-kind taxonomy shared across crates.
//!
//! Every concrete error in the workspace maps onto exactly one of these
//! kinds via a `kind()` method, so callers at the authenticated boundary can
//! translate failures uniformly while the per-crate enums keep their
//! specific variants and messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four failure classes every operation can surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A role or capability check failed (owner, governance member,
    /// moderator, node-writer capability).
    Authorization,
    /// Malformed input (empty description, null-shaped or self delegate).
    Validation,
    /// The operation is not valid in the current state (double vote,
    /// premature or repeated finalization, voting window closed).
    State,
    /// A reference to an unknown proposal, node, or member.
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::State => "state",
            Self::NotFound => "not-found",
        };
        write!(f, "{s}")
    }
}
