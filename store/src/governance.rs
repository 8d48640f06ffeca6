//! Governance storage trait.

use crate::meta::MetaStore;
use crate::StoreError;

/// Storage for the append-only proposal table. Proposals are keyed by their
/// sequential id; votes and the `has_voted` set are embedded in the record.
/// The delegation graph snapshot lives under a meta key.
pub trait GovernanceStore: MetaStore {
    /// Store a proposal record under its id.
    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal record by id, `None` if absent.
    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Iterate all proposal records in id order.
    fn iter_proposals(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}
