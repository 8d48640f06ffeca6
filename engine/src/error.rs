use agora_governance::GovernanceError;
use agora_graph::GraphError;
use agora_trust::TrustError;
use agora_types::{ErrorKind, MemberAddress};
use thiserror::Error;

/// Aggregate error surfaced at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} is not the engine owner")]
    NotOwner(MemberAddress),

    #[error(transparent)]
    Trust(#[from] TrustError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl EngineError {
    /// The taxonomy class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner(_) => ErrorKind::Authorization,
            Self::Trust(e) => e.kind(),
            Self::Governance(e) => e.kind(),
            Self::Graph(e) => e.kind(),
        }
    }
}
