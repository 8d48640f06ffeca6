use agora_types::{ErrorKind, MemberAddress, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("{0} is not the moderator")]
    NotModerator(MemberAddress),

    #[error("node writer capability already issued: only the voting engine may add nodes")]
    WriterAlreadyIssued,
}

impl GraphError {
    /// The taxonomy class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NodeNotFound(_) => ErrorKind::NotFound,
            Self::NotModerator(_) | Self::WriterAlreadyIssued => ErrorKind::Authorization,
        }
    }
}
