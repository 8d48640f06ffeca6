//! The engine facade — wires the subsystems together and applies every
//! operation in a strict total order with role gates at the boundary.

use agora_governance::{Proposal, VotingEngine};
use agora_graph::{DecisionEdge, DecisionGraph, DecisionNode, NodeWriterToken};
use agora_store::{EngineStore, StoreError};
use agora_trust::TrustRegistry;
use agora_types::{
    CategoryId, GovParams, MemberAddress, NodeId, ProposalId, Timestamp, Weight,
};

use crate::error::EngineError;

/// What finalizing a proposal did. This is the "decision added" signal —
/// event delivery to the outside world is the embedder's concern.
#[derive(Clone, Debug)]
pub struct FinalizeResult {
    pub proposal_id: ProposalId,
    /// Whether the proposal carried (`votes_for > votes_against`).
    pub accepted: bool,
    /// The decision node recorded for an accepted proposal.
    pub node_id: Option<NodeId>,
    pub votes_for: Weight,
    pub votes_against: Weight,
}

/// Meta-store key holding the engine owner.
const OWNER_META_KEY: &str = "engine/owner";

/// The assembled governance engine.
///
/// All methods take the authenticated caller explicitly; the engine trusts
/// the boundary to have established identity, and applies only role checks.
/// Mutations validate before they touch state, so a failed call has no
/// effect.
pub struct AgoraEngine {
    owner: MemberAddress,
    trust: TrustRegistry,
    voting: VotingEngine,
    graph: DecisionGraph,
    writer: NodeWriterToken,
}

impl AgoraEngine {
    pub fn new(owner: MemberAddress, params: GovParams) -> Self {
        let trust = TrustRegistry::new(params.trust_unit);
        let voting = VotingEngine::new(&params);
        let mut graph = DecisionGraph::new(params);
        let writer = graph
            .issue_writer_token()
            .expect("writer token is claimed exactly once at construction");
        Self {
            owner,
            trust,
            voting,
            graph,
            writer,
        }
    }

    pub fn owner(&self) -> &MemberAddress {
        &self.owner
    }

    fn ensure_owner(&self, caller: &MemberAddress) -> Result<(), EngineError> {
        if caller != &self.owner {
            return Err(EngineError::NotOwner(caller.clone()));
        }
        Ok(())
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Register a governance member. Owner only; idempotent.
    pub fn add_governance_member(
        &mut self,
        caller: &MemberAddress,
        member: MemberAddress,
    ) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        if self.trust.add_governance_member(member.clone()) {
            tracing::info!(member = %member, "governance member added");
        }
        Ok(())
    }

    /// Grant one trust unit to `target`. Governance members only.
    /// Returns the target's new score.
    pub fn add_trust(
        &mut self,
        caller: &MemberAddress,
        target: MemberAddress,
    ) -> Result<u64, EngineError> {
        let score = self.trust.add_trust(caller, target.clone())?;
        tracing::debug!(target = %target, score, "trust granted");
        Ok(score)
    }

    /// Create a proposal owned by the caller.
    pub fn create_proposal(
        &mut self,
        caller: &MemberAddress,
        description: &str,
        category: CategoryId,
        now: Timestamp,
    ) -> Result<ProposalId, EngineError> {
        let id = self
            .voting
            .create_proposal(caller.clone(), description, category, now)?;
        self.trust.touch(caller.clone());
        tracing::info!(proposal = %id, owner = %caller, category = %category, "proposal created");
        Ok(id)
    }

    /// Cast the caller's vote, pulling in the weight delegated to them.
    /// Returns the total weight counted.
    pub fn cast_vote(
        &mut self,
        caller: &MemberAddress,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<Weight, EngineError> {
        let weight = self.voting.cast_vote(&self.trust, caller, id, support, now)?;
        self.trust.touch(caller.clone());
        Ok(weight)
    }

    /// Set or overwrite the caller's delegate for one category.
    pub fn set_delegation(
        &mut self,
        caller: &MemberAddress,
        category: CategoryId,
        delegate: &MemberAddress,
    ) -> Result<(), EngineError> {
        self.voting.set_delegation(caller, category, delegate)?;
        self.trust.touch(caller.clone());
        tracing::debug!(delegator = %caller, category = %category, delegate = %delegate, "delegation set");
        Ok(())
    }

    /// Remove the caller's delegate for one category.
    pub fn undelegate(&mut self, caller: &MemberAddress, category: CategoryId) {
        self.voting.undelegate(caller, category);
    }

    /// Finalize a proposal once its cooling-off delay has passed. Gated by
    /// time, not identity — anyone may drive the state machine forward.
    /// On acceptance the conclusion is recorded as a decision node.
    pub fn finalize_proposal(
        &mut self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<FinalizeResult, EngineError> {
        let outcome = self.voting.finalize_proposal(id, now)?;
        let node_id = if outcome.accepted {
            let node = self.graph.add_node(
                &self.writer,
                outcome.category,
                outcome.conclusion,
                outcome.votes_for,
                now,
            );
            tracing::info!(
                proposal = %id,
                node = %node,
                weight = %outcome.votes_for,
                "decision added to graph"
            );
            Some(node)
        } else {
            tracing::info!(proposal = %id, "proposal rejected, no graph effect");
            None
        };
        Ok(FinalizeResult {
            proposal_id: id,
            accepted: outcome.accepted,
            node_id,
            votes_for: outcome.votes_for,
            votes_against: outcome.votes_against,
        })
    }

    /// Install or replace the edge-curation moderator. Owner only.
    pub fn elect_moderator(
        &mut self,
        caller: &MemberAddress,
        moderator: MemberAddress,
    ) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        tracing::info!(moderator = %moderator, "moderator elected");
        self.graph.elect_moderator(moderator);
        Ok(())
    }

    /// Curate a directed edge between two conclusions. Moderator only.
    pub fn add_edge(
        &mut self,
        caller: &MemberAddress,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<(), EngineError> {
        self.graph.add_edge(caller, from, to, weight)?;
        tracing::debug!(from = %from, to = %to, weight = %weight, "edge curated");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The power `member` would exercise by a direct cast in `category`.
    /// The category does not affect the value today (weight is delegation-
    /// independent) but scopes the question the way `cast_vote` does.
    pub fn effective_weight(
        &self,
        member: &MemberAddress,
        _category: CategoryId,
    ) -> Result<Weight, EngineError> {
        Ok(self.trust.effective_weight(member)?)
    }

    /// Current priority of a decision node at `now`.
    pub fn node_priority(&self, node: NodeId, now: Timestamp) -> Result<f64, EngineError> {
        Ok(self.graph.node_priority(node, now)?)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.voting.proposal(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&DecisionNode> {
        self.graph.node(id)
    }

    pub fn edges_from(&self, id: NodeId) -> &[DecisionEdge] {
        self.graph.edges_from(id)
    }

    pub fn moderator(&self) -> Option<&MemberAddress> {
        self.graph.moderator()
    }

    pub fn is_governance_member(&self, member: &MemberAddress) -> bool {
        self.trust.is_governance_member(member)
    }

    pub fn trust_score(&self, member: &MemberAddress) -> Option<u64> {
        self.trust.trust_score(member)
    }
}

impl AgoraEngine {
    /// Persist the whole engine to a store.
    pub fn save_to_store(&self, store: &impl EngineStore) -> Result<(), StoreError> {
        let owner_bytes = bincode::serialize(&self.owner)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        store.put_meta(OWNER_META_KEY, &owner_bytes)?;
        self.trust.save_to_store(store)?;
        self.voting.save_to_store(store)?;
        self.graph.save_to_store(store)?;
        Ok(())
    }

    /// Restore an engine from a store. The writer capability is a runtime
    /// grant and is re-claimed here.
    pub fn load_from_store(
        store: &impl EngineStore,
        params: GovParams,
    ) -> Result<Self, StoreError> {
        let owner = match store.get_meta(OWNER_META_KEY)? {
            Some(bytes) => bincode::deserialize::<MemberAddress>(&bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?,
            None => return Err(StoreError::NotFound(OWNER_META_KEY.to_string())),
        };
        let trust = TrustRegistry::load_from_store(store, params.trust_unit)?;
        let voting = VotingEngine::load_from_store(store, &params)?;
        let mut graph = DecisionGraph::load_from_store(store, params)?;
        let writer = graph
            .issue_writer_token()
            .expect("writer token is claimed exactly once after load");
        Ok(Self {
            owner,
            trust,
            voting,
            graph,
            writer,
        })
    }
}
