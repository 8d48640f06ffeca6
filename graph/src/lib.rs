//! The decision graph — the permanent record of accepted conclusions.
//!
//! Nodes are created only by the voting engine (via a writer capability)
//! when a proposal is accepted; a moderator later curates directed edges
//! between related conclusions. Both tables are append-only.
//!
//! A node's relevance is queried, never stored: its priority combines the
//! raw vote weight it was accepted with, a staleness decay, and a
//! corroboration boost from incoming edges.

pub mod decay;
pub mod error;
pub mod graph;
pub mod node;

pub use error::GraphError;
pub use graph::{DecisionGraph, NodeWriterToken};
pub use node::{DecisionEdge, DecisionNode};
