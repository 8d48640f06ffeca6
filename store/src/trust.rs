//! Trust-registry storage trait.

use crate::meta::MetaStore;
use crate::StoreError;
use agora_types::MemberAddress;

/// Storage for the user table (per-member trust records). The
/// governance-member set is small and lives under a meta key.
pub trait TrustStore: MetaStore {
    /// Store one user record, keyed by member address.
    fn put_user(&self, member: &MemberAddress, data: &[u8]) -> Result<(), StoreError>;

    /// Iterate all user records.
    fn iter_users(&self) -> Result<Vec<(MemberAddress, Vec<u8>)>, StoreError>;
}
