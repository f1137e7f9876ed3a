//! Catalog seeding
//!
//! A [`GraphSeed`] is the serialized form of a whole catalog. Loading is the
//! only way the recommender's graph changes after construction.

use super::node::ContentNode;
use super::relation::ContentRelation;
use super::store::{GraphResult, KnowledgeGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Nodes and relations of a catalog, in load order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSeed {
    #[serde(default)]
    pub nodes: Vec<ContentNode>,
    #[serde(default)]
    pub relations: Vec<ContentRelation>,
}

impl GraphSeed {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl KnowledgeGraph {
    /// Build a graph from a catalog seed
    pub fn from_seed(seed: &GraphSeed) -> GraphResult<Self> {
        let mut graph = Self::new();
        graph.seed(seed)?;
        Ok(graph)
    }

    /// Administrative re-seed: drop everything, then load the catalog
    ///
    /// On error the graph holds the nodes and the relations loaded before the
    /// offending relation.
    pub fn seed(&mut self, seed: &GraphSeed) -> GraphResult<()> {
        self.clear();
        for node in &seed.nodes {
            self.add_node(node.clone());
        }
        for relation in &seed.relations {
            self.add_relation(relation.clone())?;
        }

        info!(
            "Seeded knowledge graph: {} nodes, {} relations",
            self.node_count(),
            self.edge_count()
        );
        Ok(())
    }
}

/// Built-in demonstration catalog: three books, two topics, three cultures
pub fn sample_catalog() -> GraphSeed {
    let nodes = vec![
        ContentNode::new("book_001", "book")
            .with_property("title", "Seediq Legends")
            .with_difficulty(0.3)
            .with_property("language", "Seediq"),
        ContentNode::new("book_002", "book")
            .with_property("title", "Amis Traditions")
            .with_difficulty(0.5)
            .with_property("language", "Amis"),
        ContentNode::new("book_003", "book")
            .with_property("title", "Paiwan Stories")
            .with_difficulty(0.7)
            .with_property("language", "Paiwan"),
        ContentNode::new("topic_001", "topic")
            .with_name("Traditional Hunting")
            .with_difficulty(0.4),
        ContentNode::new("topic_002", "topic")
            .with_name("Tribal Ceremonies")
            .with_difficulty(0.6),
        ContentNode::new("culture_001", "culture").with_name("Seediq"),
        ContentNode::new("culture_002", "culture").with_name("Amis"),
        ContentNode::new("culture_003", "culture").with_name("Paiwan"),
    ];

    let relations = vec![
        ContentRelation::weighted("book_001", "book_002", "prerequisite", 0.8),
        ContentRelation::weighted("book_002", "book_003", "prerequisite", 0.9),
        ContentRelation::weighted("book_001", "topic_001", "covers", 1.0),
        ContentRelation::weighted("book_002", "topic_002", "covers", 1.0),
        ContentRelation::weighted("book_001", "culture_001", "cultural_context", 1.0),
        ContentRelation::weighted("book_002", "culture_002", "cultural_context", 1.0),
        ContentRelation::weighted("book_003", "culture_003", "cultural_context", 1.0),
        ContentRelation::weighted("topic_001", "topic_002", "related", 0.6),
    ];

    GraphSeed { nodes, relations }
}
