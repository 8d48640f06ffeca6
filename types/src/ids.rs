//! Sequential identifiers and vote weights.
//!
//! Proposal and node ids start at 1, increase strictly, and are never
//! reused (nothing is ever deleted).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weighted vote power. Wide enough that tallies over any realistic
/// membership cannot overflow.
pub type Weight = u128;

/// Identifier of a proposal, assigned sequentially from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalId(u64);

impl ProposalId {
    /// The id assigned to the first proposal.
    pub const FIRST: Self = Self(1);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a decision-graph node, assigned sequentially from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// The id assigned to the first node.
    pub const FIRST: Self = Self(1);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Topic category a proposal or delegation applies to.
///
/// Categories are opaque numbers agreed on by the membership; category 0 is
/// conventionally the general category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(u64);

impl CategoryId {
    /// The conventional general category.
    pub const GENERAL: Self = Self(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        assert_eq!(ProposalId::FIRST.as_u64(), 1);
        assert_eq!(ProposalId::FIRST.next().as_u64(), 2);
        assert_eq!(NodeId::FIRST.as_u64(), 1);
        assert_eq!(NodeId::FIRST.next().next().as_u64(), 3);
    }
}
