//! Cultural context lookup

use crate::graph::{KnowledgeGraph, NodeType, RelationType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cultural entities a content item is tagged with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalContext {
    pub cultures: Vec<String>,
    pub languages: Vec<String>,
    pub traditions: Vec<String>,
    /// Never populated by the graph; kept for callers that attach one
    pub historical_period: Option<String>,
}

impl CulturalContext {
    pub fn is_empty(&self) -> bool {
        self.cultures.is_empty() && self.languages.is_empty() && self.traditions.is_empty()
    }

    /// Distinct culture names
    pub fn culture_set(&self) -> BTreeSet<&str> {
        self.cultures.iter().map(String::as_str).collect()
    }
}

/// Collect the names of culture, language and tradition nodes linked from
/// `content_id` by `cultural_context` relations, in relation order.
///
/// Targets without a name are listed by id. Unknown ids yield an empty context.
pub fn get_cultural_context(graph: &KnowledgeGraph, content_id: &str) -> CulturalContext {
    let mut context = CulturalContext::default();

    for rel in graph.outgoing_relations(content_id) {
        if rel.relation_type != RelationType::CulturalContext {
            continue;
        }
        let Some(target) = graph.get_node(&rel.target) else {
            continue;
        };

        let bucket = match target.node_type {
            NodeType::Culture => &mut context.cultures,
            NodeType::Language => &mut context.languages,
            NodeType::Tradition => &mut context.traditions,
            _ => continue,
        };
        bucket.push(
            target
                .properties
                .name
                .clone()
                .unwrap_or_else(|| target.id.clone()),
        );
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{sample_catalog, ContentNode, ContentRelation};

    #[test]
    fn test_sample_context() {
        let graph = KnowledgeGraph::from_seed(&sample_catalog()).unwrap();
        let context = get_cultural_context(&graph, "book_002");

        assert_eq!(context.cultures, vec!["Amis"]);
        assert!(context.languages.is_empty());
        assert_eq!(context.historical_period, None);
    }

    #[test]
    fn test_buckets_by_target_type() {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(ContentNode::new("book", "book"));
        graph.add_node(ContentNode::new("c", "culture").with_name("Atayal"));
        graph.add_node(ContentNode::new("l", "language").with_name("Tayal"));
        graph.add_node(ContentNode::new("t", "tradition"));
        graph.add_node(ContentNode::new("topic", "topic").with_name("Weaving"));

        graph.add_relation(ContentRelation::new("book", "c", "cultural_context")).unwrap();
        graph.add_relation(ContentRelation::new("book", "l", "cultural_context")).unwrap();
        graph.add_relation(ContentRelation::new("book", "t", "cultural_context")).unwrap();
        // Wrong target type and wrong relation type are both ignored
        graph.add_relation(ContentRelation::new("book", "topic", "cultural_context")).unwrap();
        graph.add_relation(ContentRelation::new("c", "l", "related")).unwrap();

        let context = get_cultural_context(&graph, "book");
        assert_eq!(context.cultures, vec!["Atayal"]);
        assert_eq!(context.languages, vec!["Tayal"]);
        assert_eq!(context.traditions, vec!["t"]);
        assert_eq!(context.culture_set().len(), 1);
    }

    #[test]
    fn test_unknown_content() {
        let graph = KnowledgeGraph::from_seed(&sample_catalog()).unwrap();
        assert!(get_cultural_context(&graph, "missing").is_empty());
    }
}
