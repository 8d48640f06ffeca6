//! Decision-graph storage trait.

use crate::meta::MetaStore;
use crate::StoreError;

/// Storage for the append-only node table and the edge adjacency lists.
/// Edges are stored as one serialized list per `from` node.
pub trait GraphStore: MetaStore {
    /// Store a node record under its id.
    fn put_node(&self, id: u64, data: &[u8]) -> Result<(), StoreError>;

    /// Get a node record by id, `None` if absent.
    fn get_node(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Iterate all node records in id order.
    fn iter_nodes(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;

    /// Store the full outgoing-edge list of a node.
    fn put_edges(&self, from: u64, data: &[u8]) -> Result<(), StoreError>;

    /// Iterate all outgoing-edge lists.
    fn iter_edges(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}
