//! Decision nodes and edges.

use agora_types::{CategoryId, NodeId, Timestamp, Weight};
use serde::{Deserialize, Serialize};

/// An accepted conclusion. Never mutated or deleted once created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionNode {
    pub id: NodeId,
    /// Category of the proposal this conclusion came from.
    pub category: CategoryId,
    /// The accepted proposal's description.
    pub conclusion: String,
    /// The winning `votes_for` tally at finalization.
    pub base_weight: Weight,
    pub created_at: Timestamp,
}

/// A moderator-curated directed relation between two conclusions.
/// Append-only; duplicates are permitted and all count toward
/// corroboration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}
