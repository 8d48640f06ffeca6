//! Cloneable shared handle enforcing the single-writer discipline.
//!
//! The whole engine sits behind one `RwLock`: mutations serialize on the
//! write lock (no two interleave, none observes a partially applied
//! predecessor), while queries share the read lock and always see the most
//! recently committed state. This is the one-mutation-lock model — there is
//! deliberately no per-entity locking.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use agora_governance::Proposal;
use agora_graph::{DecisionEdge, DecisionNode};
use agora_types::{CategoryId, MemberAddress, NodeId, ProposalId, Timestamp, Weight};

use crate::engine::{AgoraEngine, FinalizeResult};
use crate::error::EngineError;

/// A cheaply cloneable handle to one engine.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<AgoraEngine>>,
}

impl SharedEngine {
    pub fn new(engine: AgoraEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, AgoraEngine> {
        self.inner.write().expect("engine state lock poisoned")
    }

    fn read(&self) -> RwLockReadGuard<'_, AgoraEngine> {
        self.inner.read().expect("engine state lock poisoned")
    }

    // ── Mutations (exclusive writer) ─────────────────────────────────────

    pub fn add_governance_member(
        &self,
        caller: &MemberAddress,
        member: MemberAddress,
    ) -> Result<(), EngineError> {
        self.write().add_governance_member(caller, member)
    }

    pub fn add_trust(
        &self,
        caller: &MemberAddress,
        target: MemberAddress,
    ) -> Result<u64, EngineError> {
        self.write().add_trust(caller, target)
    }

    pub fn create_proposal(
        &self,
        caller: &MemberAddress,
        description: &str,
        category: CategoryId,
        now: Timestamp,
    ) -> Result<ProposalId, EngineError> {
        self.write().create_proposal(caller, description, category, now)
    }

    pub fn cast_vote(
        &self,
        caller: &MemberAddress,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<Weight, EngineError> {
        self.write().cast_vote(caller, id, support, now)
    }

    pub fn set_delegation(
        &self,
        caller: &MemberAddress,
        category: CategoryId,
        delegate: &MemberAddress,
    ) -> Result<(), EngineError> {
        self.write().set_delegation(caller, category, delegate)
    }

    pub fn undelegate(&self, caller: &MemberAddress, category: CategoryId) {
        self.write().undelegate(caller, category)
    }

    pub fn finalize_proposal(
        &self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<FinalizeResult, EngineError> {
        self.write().finalize_proposal(id, now)
    }

    pub fn elect_moderator(
        &self,
        caller: &MemberAddress,
        moderator: MemberAddress,
    ) -> Result<(), EngineError> {
        self.write().elect_moderator(caller, moderator)
    }

    pub fn add_edge(
        &self,
        caller: &MemberAddress,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<(), EngineError> {
        self.write().add_edge(caller, from, to, weight)
    }

    // ── Queries (shared readers, never blocked by each other) ────────────

    pub fn effective_weight(
        &self,
        member: &MemberAddress,
        category: CategoryId,
    ) -> Result<Weight, EngineError> {
        self.read().effective_weight(member, category)
    }

    pub fn node_priority(&self, node: NodeId, now: Timestamp) -> Result<f64, EngineError> {
        self.read().node_priority(node, now)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<Proposal> {
        self.read().proposal(id).cloned()
    }

    pub fn node(&self, id: NodeId) -> Option<DecisionNode> {
        self.read().node(id).cloned()
    }

    pub fn edges_from(&self, id: NodeId) -> Vec<DecisionEdge> {
        self.read().edges_from(id).to_vec()
    }

    pub fn moderator(&self) -> Option<MemberAddress> {
        self.read().moderator().cloned()
    }

    pub fn is_governance_member(&self, member: &MemberAddress) -> bool {
        self.read().is_governance_member(member)
    }

    pub fn trust_score(&self, member: &MemberAddress) -> Option<u64> {
        self.read().trust_score(member)
    }
}
