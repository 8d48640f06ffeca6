use agora_types::{ErrorKind, MemberAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustError {
    #[error("{0} is not a governance member")]
    NotGovernanceMember(MemberAddress),

    #[error("member {0} is not known to the registry")]
    UnknownMember(MemberAddress),
}

impl TrustError {
    /// The taxonomy class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotGovernanceMember(_) => ErrorKind::Authorization,
            Self::UnknownMember(_) => ErrorKind::NotFound,
        }
    }
}
