//! In-memory storage backend.
//!
//! Reference implementation of the storage traits, used by tests and by
//! embedders that handle durability themselves. All tables are plain maps
//! behind one lock; `BTreeMap` keeps id-keyed iteration in insertion order.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use agora_types::MemberAddress;

use crate::error::StoreError;
use crate::governance::GovernanceStore;
use crate::graph::GraphStore;
use crate::meta::MetaStore;
use crate::trust::TrustStore;

#[derive(Default)]
struct Tables {
    meta: HashMap<String, Vec<u8>>,
    users: HashMap<MemberAddress, Vec<u8>>,
    proposals: BTreeMap<u64, Vec<u8>>,
    nodes: BTreeMap<u64, Vec<u8>>,
    edges: BTreeMap<u64, Vec<u8>>,
}

/// An in-memory backend implementing every storage trait.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }
}

impl MetaStore for MemoryStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.write()?.meta.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.meta.get(key).cloned())
    }
}

impl TrustStore for MemoryStore {
    fn put_user(&self, member: &MemberAddress, data: &[u8]) -> Result<(), StoreError> {
        self.write()?.users.insert(member.clone(), data.to_vec());
        Ok(())
    }

    fn iter_users(&self) -> Result<Vec<(MemberAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .read()?
            .users
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl GovernanceStore for MemoryStore {
    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        self.write()?.proposals.insert(id, data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.proposals.get(&id).cloned())
    }

    fn iter_proposals(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(self
            .read()?
            .proposals
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect())
    }
}

impl GraphStore for MemoryStore {
    fn put_node(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        self.write()?.nodes.insert(id, data.to_vec());
        Ok(())
    }

    fn get_node(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.nodes.get(&id).cloned())
    }

    fn iter_nodes(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(self
            .read()?
            .nodes
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect())
    }

    fn put_edges(&self, from: u64, data: &[u8]) -> Result<(), StoreError> {
        self.write()?.edges.insert(from, data.to_vec());
        Ok(())
    }

    fn iter_edges(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(self
            .read()?
            .edges
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get_meta("trust/members").unwrap().is_none());
        store.put_meta("trust/members", b"abc").unwrap();
        assert_eq!(store.get_meta("trust/members").unwrap().unwrap(), b"abc");
    }

    #[test]
    fn test_proposals_iterate_in_id_order() {
        let store = MemoryStore::new();
        store.put_proposal(2, b"two").unwrap();
        store.put_proposal(1, b"one").unwrap();
        let all = store.iter_proposals().unwrap();
        assert_eq!(all[0].0, 1);
        assert_eq!(all[1].0, 2);
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put_node(1, b"a").unwrap();
        store.put_node(1, b"b").unwrap();
        assert_eq!(store.get_node(1).unwrap().unwrap(), b"b");
        assert_eq!(store.iter_nodes().unwrap().len(), 1);
    }
}
