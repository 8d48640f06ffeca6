//! Metadata storage trait.

use crate::StoreError;

/// Generic key-value store for small singletons and counters that don't
/// belong in any table: next ids, the governance-member set, the elected
/// moderator, engine snapshots.
///
/// Keys are namespaced by convention (`"trust/…"`, `"governance/…"`,
/// `"graph/…"`) so the engines can share one backend without collisions.
pub trait MetaStore {
    /// Store a metadata value.
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve a metadata value, `None` if absent.
    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
