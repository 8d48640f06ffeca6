//! The decision graph itself — node and edge storage plus priority queries.

use std::collections::HashMap;

use agora_store::{GraphStore, StoreError};
use agora_types::{CategoryId, GovParams, MemberAddress, NodeId, Timestamp, Weight};
use serde::{Deserialize, Serialize};

use crate::decay::{corroboration_factor, decay_factor};
use crate::error::GraphError;
use crate::node::{DecisionEdge, DecisionNode};

/// Capability to create nodes. Issued at most once per graph, to the voting
/// engine; possession is the authorization, so nothing else can even
/// express an `add_node` call. Not clonable, not constructible elsewhere.
pub struct NodeWriterToken {
    _private: (),
}

/// Meta-store keys.
const NEXT_NODE_ID_META_KEY: &str = "graph/next_node_id";
const MODERATOR_META_KEY: &str = "graph/moderator";

/// The decision graph — append-only conclusions and curated relations.
pub struct DecisionGraph {
    params: GovParams,
    next_node_id: NodeId,
    nodes: HashMap<NodeId, DecisionNode>,
    /// Adjacency list keyed by the `from` node.
    edges_from: HashMap<NodeId, Vec<DecisionEdge>>,
    /// Incrementally maintained sum of incoming edge weight per node, so
    /// priority queries never walk the whole edge table.
    incoming_weight: HashMap<NodeId, Weight>,
    moderator: Option<MemberAddress>,
    writer_issued: bool,
}

impl DecisionGraph {
    pub fn new(params: GovParams) -> Self {
        Self {
            params,
            next_node_id: NodeId::FIRST,
            nodes: HashMap::new(),
            edges_from: HashMap::new(),
            incoming_weight: HashMap::new(),
            moderator: None,
            writer_issued: false,
        }
    }

    /// Claim the node-writer capability. The first caller (the voting
    /// engine, at wiring time) gets the token; anyone later is refused.
    pub fn issue_writer_token(&mut self) -> Result<NodeWriterToken, GraphError> {
        if self.writer_issued {
            return Err(GraphError::WriterAlreadyIssued);
        }
        self.writer_issued = true;
        Ok(NodeWriterToken { _private: () })
    }

    /// Record an accepted conclusion. Requires the writer capability.
    pub fn add_node(
        &mut self,
        _token: &NodeWriterToken,
        category: CategoryId,
        conclusion: String,
        base_weight: Weight,
        created_at: Timestamp,
    ) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id = id.next();
        self.nodes.insert(
            id,
            DecisionNode {
                id,
                category,
                conclusion,
                base_weight,
                created_at,
            },
        );
        id
    }

    /// Install or replace the moderator. The owner gate is applied by the
    /// caller.
    pub fn elect_moderator(&mut self, moderator: MemberAddress) {
        self.moderator = Some(moderator);
    }

    pub fn moderator(&self) -> Option<&MemberAddress> {
        self.moderator.as_ref()
    }

    /// Append a directed edge between two existing nodes. Only the elected
    /// moderator may curate edges; duplicates are permitted.
    pub fn add_edge(
        &mut self,
        caller: &MemberAddress,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        if self.moderator.as_ref() != Some(caller) {
            return Err(GraphError::NotModerator(caller.clone()));
        }
        if !self.nodes.contains_key(&from) {
            return Err(GraphError::NodeNotFound(from));
        }
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::NodeNotFound(to));
        }
        self.edges_from
            .entry(from)
            .or_default()
            .push(DecisionEdge { from, to, weight });
        let incoming = self.incoming_weight.entry(to).or_default();
        *incoming = incoming.saturating_add(weight);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&DecisionNode> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn edges_from(&self, id: NodeId) -> &[DecisionEdge] {
        self.edges_from.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total incoming edge weight of a node.
    pub fn incoming_weight(&self, id: NodeId) -> Weight {
        self.incoming_weight.get(&id).copied().unwrap_or(0)
    }

    /// Current relevance of a conclusion:
    /// `base_weight × decay(now − created_at) × (1 + corroboration)`.
    /// Pure query; depends only on the node, its incoming edges, and `now`.
    pub fn node_priority(&self, id: NodeId, now: Timestamp) -> Result<f64, GraphError> {
        let node = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;
        let elapsed = node.created_at.elapsed_since(now);
        let decay = decay_factor(elapsed, &self.params);
        let corroboration = corroboration_factor(self.incoming_weight(id), &self.params);
        Ok(node.base_weight as f64 * decay * (1.0 + corroboration))
    }
}

/// Serializable snapshot of the graph tables. The writer capability is a
/// runtime grant, not state — it is re-issued after a load.
#[derive(Serialize, Deserialize)]
struct ModeratorRecord(Option<MemberAddress>);

impl DecisionGraph {
    /// Persist nodes, edges, the moderator, and the id counter.
    pub fn save_to_store(&self, store: &dyn GraphStore) -> Result<(), StoreError> {
        let id_bytes = self.next_node_id.as_u64().to_be_bytes();
        store.put_meta(NEXT_NODE_ID_META_KEY, &id_bytes)?;

        let moderator_bytes = bincode::serialize(&ModeratorRecord(self.moderator.clone()))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        store.put_meta(MODERATOR_META_KEY, &moderator_bytes)?;

        for (id, node) in &self.nodes {
            let bytes = bincode::serialize(node)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_node(id.as_u64(), &bytes)?;
        }
        for (from, edges) in &self.edges_from {
            let bytes = bincode::serialize(edges)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_edges(from.as_u64(), &bytes)?;
        }
        Ok(())
    }

    /// Restore a graph from a store, rebuilding the incoming-weight index.
    pub fn load_from_store(
        store: &dyn GraphStore,
        params: GovParams,
    ) -> Result<Self, StoreError> {
        let next_node_id = match store.get_meta(NEXT_NODE_ID_META_KEY)? {
            Some(bytes) if bytes.len() >= 8 => {
                NodeId::new(u64::from_be_bytes(bytes[..8].try_into().unwrap()))
            }
            _ => NodeId::FIRST,
        };

        let moderator = match store.get_meta(MODERATOR_META_KEY)? {
            Some(bytes) => {
                let ModeratorRecord(m) = bincode::deserialize(&bytes)
                    .map_err(|e| StoreError::Corruption(e.to_string()))?;
                m
            }
            None => None,
        };

        let mut nodes = HashMap::new();
        for (id, bytes) in store.iter_nodes()? {
            let node: DecisionNode = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            nodes.insert(NodeId::new(id), node);
        }

        let mut edges_from = HashMap::new();
        let mut incoming_weight = HashMap::<NodeId, Weight>::new();
        for (from, bytes) in store.iter_edges()? {
            let edges: Vec<DecisionEdge> = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            for edge in &edges {
                let incoming = incoming_weight.entry(edge.to).or_default();
                *incoming = incoming.saturating_add(edge.weight);
            }
            edges_from.insert(NodeId::new(from), edges);
        }

        Ok(Self {
            params,
            next_node_id,
            nodes,
            edges_from,
            incoming_weight,
            moderator,
            writer_issued: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_store::MemoryStore;

    fn member(name: &str) -> MemberAddress {
        MemberAddress::new(format!("agr_{name}"))
    }

    fn graph() -> (DecisionGraph, NodeWriterToken) {
        let mut graph = DecisionGraph::new(GovParams::default());
        let token = graph.issue_writer_token().unwrap();
        (graph, token)
    }

    fn add_node(graph: &mut DecisionGraph, token: &NodeWriterToken, weight: Weight) -> NodeId {
        graph.add_node(
            token,
            CategoryId::GENERAL,
            "conclusion".to_string(),
            weight,
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_writer_token_issued_once() {
        let (mut graph, _token) = graph();
        assert!(matches!(
            graph.issue_writer_token(),
            Err(GraphError::WriterAlreadyIssued)
        ));
    }

    #[test]
    fn test_node_ids_sequential_from_one() {
        let (mut graph, token) = graph();
        assert_eq!(add_node(&mut graph, &token, 10).as_u64(), 1);
        assert_eq!(add_node(&mut graph, &token, 10).as_u64(), 2);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_edge_requires_moderator() {
        let (mut graph, token) = graph();
        let a = add_node(&mut graph, &token, 10);
        let b = add_node(&mut graph, &token, 10);

        let outsider = member("outsider");
        assert!(matches!(
            graph.add_edge(&outsider, a, b, 5),
            Err(GraphError::NotModerator(_))
        ));

        let moderator = member("moderator");
        graph.elect_moderator(moderator.clone());
        graph.add_edge(&moderator, a, b, 5).unwrap();
        assert_eq!(graph.edges_from(a).len(), 1);
        assert_eq!(graph.incoming_weight(b), 5);
    }

    #[test]
    fn test_edge_endpoints_must_exist() {
        let (mut graph, token) = graph();
        let a = add_node(&mut graph, &token, 10);
        let moderator = member("moderator");
        graph.elect_moderator(moderator.clone());

        let ghost = NodeId::new(99);
        assert!(matches!(
            graph.add_edge(&moderator, a, ghost, 5),
            Err(GraphError::NodeNotFound(_))
        ));
        assert!(matches!(
            graph.add_edge(&moderator, ghost, a, 5),
            Err(GraphError::NodeNotFound(_))
        ));
        assert!(graph.edges_from(a).is_empty());
    }

    #[test]
    fn test_duplicate_edges_accumulate() {
        let (mut graph, token) = graph();
        let a = add_node(&mut graph, &token, 10);
        let b = add_node(&mut graph, &token, 10);
        let moderator = member("moderator");
        graph.elect_moderator(moderator.clone());

        graph.add_edge(&moderator, a, b, 300).unwrap();
        graph.add_edge(&moderator, a, b, 300).unwrap();
        assert_eq!(graph.edges_from(a).len(), 2);
        assert_eq!(graph.incoming_weight(b), 600);
    }

    #[test]
    fn test_moderator_is_overwritable() {
        let (mut graph, _token) = graph();
        let first = member("first");
        let second = member("second");
        graph.elect_moderator(first.clone());
        graph.elect_moderator(second.clone());
        assert_eq!(graph.moderator(), Some(&second));
    }

    #[test]
    fn test_fresh_node_priority_near_base_confidence() {
        let (mut graph, token) = graph();
        let id = add_node(&mut graph, &token, 1000);
        let priority = graph.node_priority(id, Timestamp::new(1000)).unwrap();
        assert!(
            (600.0..=800.0).contains(&priority),
            "fresh priority {priority} outside 600..=800"
        );
    }

    #[test]
    fn test_priority_decays_toward_floor() {
        let (mut graph, token) = graph();
        let id = add_node(&mut graph, &token, 1000);
        let created = Timestamp::new(1000);

        let half_life = GovParams::default().decay_half_life_secs;
        let fresh = graph.node_priority(id, created).unwrap();
        let aged = graph
            .node_priority(id, created.add_secs(half_life))
            .unwrap();
        let ancient = graph
            .node_priority(id, created.add_secs(100 * half_life))
            .unwrap();

        assert!(fresh > aged && aged > ancient);
        assert!((aged - 350.0).abs() < 1e-6);
        assert!((ancient - 100.0).abs() < 1e-6); // floored at 0.1 × 1000
    }

    #[test]
    fn test_corroboration_boosts_priority() {
        let (mut graph, token) = graph();
        let a = add_node(&mut graph, &token, 1000);
        let b = add_node(&mut graph, &token, 1000);
        let moderator = member("moderator");
        graph.elect_moderator(moderator.clone());
        graph.add_edge(&moderator, a, b, 500).unwrap();

        let now = Timestamp::new(1000);
        let plain = graph.node_priority(a, now).unwrap();
        let boosted = graph.node_priority(b, now).unwrap();
        // +0.5 corroboration → 1.5× the unboosted priority.
        assert!((boosted - plain * 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_priority_unknown_node() {
        let (graph, _token) = graph();
        assert!(matches!(
            graph.node_priority(NodeId::new(1), Timestamp::new(0)),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_store_round_trip() {
        let (mut graph, token) = graph();
        let a = add_node(&mut graph, &token, 1000);
        let b = add_node(&mut graph, &token, 500);
        let moderator = member("moderator");
        graph.elect_moderator(moderator.clone());
        graph.add_edge(&moderator, a, b, 500).unwrap();

        let store = MemoryStore::new();
        graph.save_to_store(&store).unwrap();
        let mut restored = DecisionGraph::load_from_store(&store, GovParams::default()).unwrap();

        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.moderator(), Some(&moderator));
        assert_eq!(restored.incoming_weight(b), 500);
        assert_eq!(restored.edges_from(a).len(), 1);

        // Ids continue, and the writer capability is re-issuable after load.
        let token = restored.issue_writer_token().unwrap();
        let c = add_node(&mut restored, &token, 10);
        assert_eq!(c.as_u64(), 3);
    }
}
