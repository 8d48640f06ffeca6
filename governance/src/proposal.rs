//! Proposals and their lifecycle.

use std::collections::HashSet;

use agora_types::{CategoryId, MemberAddress, ProposalId, Timestamp, Weight};
use serde::{Deserialize, Serialize};

/// Where a proposal is in its life. Transitions are driven purely by time
/// and the one-shot finalization call — there is no other path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalPhase {
    /// Accepting votes (`now < end_time`).
    Open,
    /// Voting closed, cooling off until finalization is allowed.
    AwaitingFinalization,
    /// Finalized; the record is immutable from here on.
    Finalized,
}

/// A proposal under vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Who created it.
    pub owner: MemberAddress,
    /// What is being decided. Non-empty; becomes the conclusion text of the
    /// decision node if the proposal is accepted.
    pub description: String,
    /// Topic category, scoping which delegations apply.
    pub category: CategoryId,
    pub created_at: Timestamp,
    /// End of the voting window: `created_at + voting_period`.
    pub end_time: Timestamp,
    /// Weighted tally in favor.
    pub votes_for: Weight,
    /// Weighted tally against.
    pub votes_against: Weight,
    pub finalized: bool,
    /// Everyone whose weight has been counted — direct casters and the
    /// delegators counted through them. Each entry is set at most once.
    pub has_voted: HashSet<MemberAddress>,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        owner: MemberAddress,
        description: String,
        category: CategoryId,
        created_at: Timestamp,
        voting_period_secs: u64,
    ) -> Self {
        Self {
            id,
            owner,
            description,
            category,
            created_at,
            end_time: created_at.add_secs(voting_period_secs),
            votes_for: 0,
            votes_against: 0,
            finalized: false,
            has_voted: HashSet::new(),
        }
    }

    pub fn phase(&self, now: Timestamp) -> ProposalPhase {
        if self.finalized {
            ProposalPhase::Finalized
        } else if self.voting_open(now) {
            ProposalPhase::Open
        } else {
            ProposalPhase::AwaitingFinalization
        }
    }

    /// Whether votes are still accepted at `now`.
    pub fn voting_open(&self, now: Timestamp) -> bool {
        now.as_secs() < self.end_time.as_secs()
    }

    /// Whether the tally carries (strictly more weight in favor).
    pub fn accepted(&self) -> bool {
        self.votes_for > self.votes_against
    }
}
