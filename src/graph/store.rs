//! In-memory content graph storage
//!
//! Nodes are keyed by string id; each node owns an ordered adjacency map of
//! outgoing relations (at most one relation per ordered node pair). A dense
//! CSR [`GraphView`] is built lazily for the traversal algorithms and dropped
//! on every mutation.

use super::node::ContentNode;
use super::relation::{ContentRelation, EdgeData};
use super::types::RelationType;
use indexmap::{IndexMap, IndexSet};
use readgraph_algorithms::{GraphView, NodeId as AlgoNodeId, TypeCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid weight {weight} on relation {from} -> {to}: weights must be finite and non-negative")]
    InvalidWeight { from: String, to: String, weight: f64 },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Summary statistics of a content graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub node_types: BTreeMap<String, usize>,
    pub relation_types: BTreeMap<String, usize>,
    /// Mean out-degree (edges / nodes)
    pub average_degree: f64,
}

/// Directed content graph with typed, weighted relations
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    /// Node storage in insertion order; the position doubles as the dense algorithm id
    nodes: IndexMap<String, ContentNode>,

    /// Outgoing relations: source -> (target -> relation)
    outgoing: IndexMap<String, IndexMap<String, ContentRelation>>,

    /// Interned relation types; the position is the algorithm type code
    relation_codes: IndexSet<RelationType>,

    /// Cached algorithm view, rebuilt after mutation
    view: OnceLock<GraphView>,
}

impl KnowledgeGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a node by id
    pub fn add_node(&mut self, node: ContentNode) {
        debug!("Added node: {} (type: {})", node.id, node.node_type);
        self.nodes.insert(node.id.clone(), node);
        self.view.take();
    }

    /// Insert a directed relation, replacing any previous relation for the same ordered pair
    ///
    /// Endpoints are not checked; a relation becomes traversable once both endpoints exist.
    pub fn add_relation(&mut self, relation: ContentRelation) -> GraphResult<()> {
        if !relation.has_valid_weight() {
            return Err(GraphError::InvalidWeight {
                from: relation.source,
                to: relation.target,
                weight: relation.weight,
            });
        }

        debug!(
            "Added relation: {} --[{}]--> {}",
            relation.source, relation.relation_type, relation.target
        );

        self.relation_codes.insert(relation.relation_type.clone());
        self.outgoing
            .entry(relation.source.clone())
            .or_default()
            .insert(relation.target.clone(), relation);
        self.view.take();
        Ok(())
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values()
    }

    /// Outgoing relations of a node whose target exists, in insertion order
    pub fn outgoing_relations(&self, id: &str) -> impl Iterator<Item = &ContentRelation> {
        self.outgoing
            .get(id)
            .into_iter()
            .flat_map(|targets| targets.values())
            .filter(|rel| self.nodes.contains_key(&rel.target))
    }

    /// Outgoing neighbor ids; empty for an unknown node
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.outgoing_relations(id)
            .map(|rel| rel.target.as_str())
            .collect()
    }

    /// The relation stored for an ordered pair, if any
    pub fn relation(&self, source: &str, target: &str) -> Option<&ContentRelation> {
        self.outgoing.get(source).and_then(|targets| targets.get(target))
    }

    /// Relation attributes for an ordered pair; absent relations read as weight 1.0, untyped
    pub fn edge_data(&self, source: &str, target: &str) -> EdgeData<'_> {
        self.relation(source, target)
            .map(EdgeData::from)
            .unwrap_or_default()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of stored relations
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(IndexMap::len).sum()
    }

    /// Dense algorithm id of a node
    pub fn algo_id(&self, id: &str) -> Option<AlgoNodeId> {
        self.nodes.get_index_of(id).map(|idx| idx as AlgoNodeId)
    }

    /// Node id for a dense algorithm id
    pub fn node_id(&self, algo_id: AlgoNodeId) -> Option<&str> {
        self.nodes
            .get_index(algo_id as usize)
            .map(|(id, _)| id.as_str())
    }

    /// Algorithm type code of a relation type present in the graph
    pub fn relation_code(&self, relation_type: &RelationType) -> Option<TypeCode> {
        self.relation_codes
            .get_index_of(relation_type)
            .map(|idx| idx as TypeCode)
    }

    /// Read-only CSR view for the traversal algorithms
    pub fn view(&self) -> &GraphView {
        self.view.get_or_init(|| self.build_view())
    }

    fn build_view(&self) -> GraphView {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (u_idx, source) in self.nodes.keys().enumerate() {
            for rel in self.outgoing_relations(source) {
                let (Some(v_idx), Some(code)) = (
                    self.nodes.get_index_of(&rel.target),
                    self.relation_code(&rel.relation_type),
                ) else {
                    continue;
                };
                edges.push((u_idx, v_idx, rel.weight, code));
            }
        }

        debug!("Built graph view: {} nodes, {} edges", self.nodes.len(), edges.len());
        GraphView::from_edges(self.nodes.len(), &edges)
    }

    /// Node/edge counts, per-type breakdowns and mean out-degree
    pub fn statistics(&self) -> GraphStatistics {
        let mut node_types = BTreeMap::new();
        for node in self.nodes.values() {
            *node_types.entry(node.node_type.to_string()).or_insert(0) += 1;
        }

        let mut relation_types = BTreeMap::new();
        for rel in self.outgoing.values().flat_map(IndexMap::values) {
            *relation_types.entry(rel.relation_type.to_string()).or_insert(0) += 1;
        }

        let num_nodes = self.node_count();
        let num_edges = self.edge_count();
        let average_degree = if num_nodes == 0 {
            0.0
        } else {
            num_edges as f64 / num_nodes as f64
        };

        GraphStatistics {
            num_nodes,
            num_edges,
            node_types,
            relation_types,
            average_degree,
        }
    }

    /// Clear all data from the graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.outgoing.clear();
        self.relation_codes.clear();
        self.view.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(ContentNode::new("a", "book").with_difficulty(0.3));
        graph.add_node(ContentNode::new("b", "book"));
        graph.add_node(ContentNode::new("c", "culture").with_name("Amis"));
        graph
            .add_relation(ContentRelation::weighted("a", "b", "prerequisite", 0.8))
            .unwrap();
        graph
            .add_relation(ContentRelation::new("a", "c", "cultural_context"))
            .unwrap();
        graph
    }

    #[test]
    fn test_add_and_overwrite_node() {
        let mut graph = chain();
        assert_eq!(graph.node_count(), 3);

        graph.add_node(ContentNode::new("a", "book").with_difficulty(0.9));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.get_node("a").unwrap().difficulty_or(0.5), 0.9);
        assert_eq!(graph.algo_id("a"), Some(0));
    }

    #[test]
    fn test_duplicate_pair_overwrites() {
        let mut graph = chain();
        graph
            .add_relation(ContentRelation::weighted("a", "b", "related", 0.2))
            .unwrap();

        assert_eq!(graph.edge_count(), 2);
        let data = graph.edge_data("a", "b");
        assert_eq!(data.type_name(), "related");
        assert_eq!(data.weight, 0.2);
        // Position of the overwritten edge is kept
        assert_eq!(graph.neighbors("a"), vec!["b", "c"]);
    }

    #[test]
    fn test_unknown_ids_fail_soft() {
        let graph = chain();
        assert!(graph.neighbors("missing").is_empty());

        let data = graph.edge_data("b", "a");
        assert_eq!(data.weight, 1.0);
        assert_eq!(data.type_name(), "");
    }

    #[test]
    fn test_dangling_relation_not_traversable() {
        let mut graph = chain();
        graph
            .add_relation(ContentRelation::new("b", "ghost", "related"))
            .unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert!(graph.neighbors("b").is_empty());
        assert_eq!(graph.view().edge_count(), 2);

        graph.add_node(ContentNode::new("ghost", "book"));
        assert_eq!(graph.neighbors("b"), vec!["ghost"]);
        assert_eq!(graph.view().edge_count(), 3);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let mut graph = chain();
        let err = graph
            .add_relation(ContentRelation::weighted("a", "b", "related", f64::NAN))
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { ref from, ref to, .. } if from == "a" && to == "b"));
        assert!(err.to_string().contains("a -> b"));
        assert_eq!(graph.edge_data("a", "b").weight, 0.8);
    }

    #[test]
    fn test_statistics() {
        let stats = chain().statistics();
        assert_eq!(stats.num_nodes, 3);
        assert_eq!(stats.num_edges, 2);
        assert_eq!(stats.node_types.get("book"), Some(&2));
        assert_eq!(stats.node_types.get("culture"), Some(&1));
        assert_eq!(stats.relation_types.get("prerequisite"), Some(&1));
        assert!((stats.average_degree - 2.0 / 3.0).abs() < 1e-12);

        assert_eq!(KnowledgeGraph::new().statistics().average_degree, 0.0);
    }

    #[test]
    fn test_view_matches_store() {
        let graph = chain();
        let view = graph.view();
        let a = graph.algo_id("a").unwrap() as usize;

        assert_eq!(view.node_count, 3);
        assert_eq!(view.out_degree(a), 2);
        assert_eq!(view.weights(a), &[0.8, 1.0]);
        assert_eq!(
            Some(view.edge_type(a, 1)),
            graph.relation_code(&RelationType::CulturalContext)
        );
        assert_eq!(graph.node_id(view.successors(a)[0] as u64), Some("b"));
    }

    #[test]
    fn test_clear() {
        let mut graph = chain();
        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.view().node_count, 0);
    }
}
