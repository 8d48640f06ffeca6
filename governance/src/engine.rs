//! Core voting engine — proposals through the voting and finalization
//! lifecycle, with delegated-weight aggregation at cast time.

use std::collections::HashMap;

use agora_store::{GovernanceStore, StoreError};
use agora_trust::TrustRegistry;
use agora_types::{CategoryId, GovParams, MemberAddress, ProposalId, Timestamp, Weight};

use crate::delegation::DelegationResolver;
use crate::error::GovernanceError;
use crate::proposal::Proposal;

/// What finalization concluded. Carries everything the caller needs to
/// record an accepted conclusion in the decision graph.
#[derive(Clone, Debug)]
pub struct FinalizeOutcome {
    pub proposal_id: ProposalId,
    pub category: CategoryId,
    /// The proposal description, which becomes the conclusion text of the
    /// decision node on acceptance.
    pub conclusion: String,
    /// Whether `votes_for` strictly exceeded `votes_against`.
    pub accepted: bool,
    pub votes_for: Weight,
    pub votes_against: Weight,
}

/// Meta-store key for the next proposal id.
const NEXT_PROPOSAL_ID_META_KEY: &str = "governance/next_proposal_id";

/// The voting engine — proposal records, vote tallies, and the time-locked
/// finalization state machine.
pub struct VotingEngine {
    voting_period_secs: u64,
    finalize_delay_secs: u64,
    next_proposal_id: ProposalId,
    proposals: HashMap<ProposalId, Proposal>,
    delegations: DelegationResolver,
}

impl VotingEngine {
    pub fn new(params: &GovParams) -> Self {
        Self {
            voting_period_secs: params.voting_period_secs,
            finalize_delay_secs: params.finalize_delay_secs,
            next_proposal_id: ProposalId::FIRST,
            proposals: HashMap::new(),
            delegations: DelegationResolver::new(params.max_delegation_depth),
        }
    }

    /// Create a proposal. Ids are sequential and never reused.
    pub fn create_proposal(
        &mut self,
        owner: MemberAddress,
        description: &str,
        category: CategoryId,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if description.is_empty() {
            return Err(GovernanceError::EmptyDescription);
        }
        let id = self.next_proposal_id;
        self.next_proposal_id = id.next();
        self.proposals.insert(
            id,
            Proposal::new(
                id,
                owner,
                description.to_string(),
                category,
                now,
                self.voting_period_secs,
            ),
        );
        Ok(id)
    }

    /// Cast a vote, aggregating the weight delegated in to the caster.
    ///
    /// The counted weight is the caster's base weight plus the base weight
    /// of every member whose delegation chain for the proposal's category
    /// terminates at the caster and who has not voted yet. All of them are
    /// marked voted, so no weight can be counted twice. Cyclic or over-deep
    /// chains contribute nothing.
    ///
    /// Returns the total weight added to the tally.
    pub fn cast_vote(
        &mut self,
        trust: &TrustRegistry,
        caller: &MemberAddress,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<Weight, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if !proposal.voting_open(now) {
            return Err(GovernanceError::VotingClosed(id));
        }
        if proposal.has_voted.contains(caller) {
            return Err(GovernanceError::AlreadyVoted(caller.clone(), id));
        }

        // Aggregate before mutating anything, so a failure above leaves no
        // partial state and the tally update below is all-or-nothing.
        let mut weight = trust.base_weight(caller);
        let mut counted = Vec::new();
        for delegator in self
            .delegations
            .delegators_resolving_to(caller, proposal.category)
        {
            if delegator == *caller || proposal.has_voted.contains(&delegator) {
                continue;
            }
            weight += trust.base_weight(&delegator);
            counted.push(delegator);
        }

        proposal.has_voted.insert(caller.clone());
        proposal.has_voted.extend(counted);
        if support {
            proposal.votes_for += weight;
        } else {
            proposal.votes_against += weight;
        }
        tracing::debug!(proposal = %id, voter = %caller, weight = %weight, support, "vote counted");
        Ok(weight)
    }

    /// Finalize a proposal once the cooling-off delay after the voting
    /// window has passed. Succeeds at most once per proposal.
    pub fn finalize_proposal(
        &mut self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<FinalizeOutcome, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if proposal.finalized {
            return Err(GovernanceError::AlreadyFinalized(id));
        }
        if !proposal.end_time.has_expired(self.finalize_delay_secs, now) {
            return Err(GovernanceError::FinalizeDelayNotPassed(id));
        }
        proposal.finalized = true;
        Ok(FinalizeOutcome {
            proposal_id: id,
            category: proposal.category,
            conclusion: proposal.description.clone(),
            accepted: proposal.accepted(),
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
        })
    }

    /// Set or overwrite the caller's delegation for one category.
    pub fn set_delegation(
        &mut self,
        caller: &MemberAddress,
        category: CategoryId,
        delegate: &MemberAddress,
    ) -> Result<(), GovernanceError> {
        self.delegations.set_delegation(caller, category, delegate)
    }

    /// Remove the caller's delegation for one category.
    pub fn undelegate(&mut self, caller: &MemberAddress, category: CategoryId) {
        self.delegations.undelegate(caller, category)
    }

    pub fn delegations(&self) -> &DelegationResolver {
        &self.delegations
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }
}

impl VotingEngine {
    /// Persist all proposals, the delegation graph, and the id counter.
    pub fn save_to_store(&self, store: &dyn GovernanceStore) -> Result<(), StoreError> {
        let id_bytes = self.next_proposal_id.as_u64().to_be_bytes();
        store.put_meta(NEXT_PROPOSAL_ID_META_KEY, &id_bytes)?;
        store.put_meta(DelegationResolver::meta_key(), &self.delegations.save_state())?;

        for (id, proposal) in &self.proposals {
            let bytes = bincode::serialize(proposal)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_proposal(id.as_u64(), &bytes)?;
        }
        Ok(())
    }

    /// Restore the voting engine from a governance store.
    pub fn load_from_store(
        store: &dyn GovernanceStore,
        params: &GovParams,
    ) -> Result<Self, StoreError> {
        let next_proposal_id = match store.get_meta(NEXT_PROPOSAL_ID_META_KEY)? {
            Some(bytes) if bytes.len() >= 8 => {
                ProposalId::new(u64::from_be_bytes(bytes[..8].try_into().unwrap()))
            }
            _ => ProposalId::FIRST,
        };

        let delegations = match store.get_meta(DelegationResolver::meta_key())? {
            Some(bytes) => DelegationResolver::load_state(&bytes, params.max_delegation_depth),
            None => DelegationResolver::new(params.max_delegation_depth),
        };

        let mut proposals = HashMap::new();
        for (id, bytes) in store.iter_proposals()? {
            let proposal: Proposal = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            proposals.insert(ProposalId::new(id), proposal);
        }

        Ok(Self {
            voting_period_secs: params.voting_period_secs,
            finalize_delay_secs: params.finalize_delay_secs,
            next_proposal_id,
            proposals,
            delegations,
        })
    }
}
