use agora_types::{ErrorKind, MemberAddress, ProposalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("invalid description: must not be empty")]
    EmptyDescription,

    #[error("voting closed for proposal {0}")]
    VotingClosed(ProposalId),

    #[error("{0} has already voted on proposal {1}")]
    AlreadyVoted(MemberAddress, ProposalId),

    #[error("finalize delay not passed for proposal {0}")]
    FinalizeDelayNotPassed(ProposalId),

    #[error("proposal {0} is already finalized")]
    AlreadyFinalized(ProposalId),

    #[error("cannot delegate to self")]
    SelfDelegation,

    #[error("invalid delegate address: {0}")]
    InvalidDelegate(MemberAddress),
}

impl GovernanceError {
    /// The taxonomy class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProposalNotFound(_) => ErrorKind::NotFound,
            Self::EmptyDescription | Self::SelfDelegation | Self::InvalidDelegate(_) => {
                ErrorKind::Validation
            }
            Self::VotingClosed(_)
            | Self::AlreadyVoted(_, _)
            | Self::FinalizeDelayNotPassed(_)
            | Self::AlreadyFinalized(_) => ErrorKind::State,
        }
    }
}
