//! Multi-hop related-content search

use crate::graph::{KnowledgeGraph, RelationType};
use readgraph_algorithms::{decayed_traversal, TraversalConfig};
use std::collections::HashSet;
use tracing::debug;

/// Content reachable from `start_id`, scored with per-hop decay.
///
/// A node reached over a chain of edges scores the product of the edge weights
/// times `config.decay` per hop, keeping its best score over every examined
/// edge. When `relation_types` is non-empty, only edges of those types are
/// walked; an empty slice means no filter.
/// The start node is never returned. Ordered by score descending, ties in
/// discovery order, at most `config.limit` entries. Unknown ids yield `[]`.
pub fn find_related_content(
    graph: &KnowledgeGraph,
    start_id: &str,
    relation_types: Option<&[RelationType]>,
    config: &TraversalConfig,
) -> Vec<(String, f64)> {
    let Some(source) = graph.algo_id(start_id) else {
        return Vec::new();
    };

    // Types absent from the graph have no code and match nothing
    let allowed: Option<HashSet<_>> = relation_types.filter(|types| !types.is_empty()).map(|types| {
        types
            .iter()
            .filter_map(|t| graph.relation_code(t))
            .collect()
    });

    let scored = decayed_traversal(graph.view(), source, config, allowed.as_ref());
    debug!(
        "Related content for {}: {} nodes within {} hops",
        start_id,
        scored.len(),
        config.max_hops
    );

    scored
        .into_iter()
        .filter_map(|(id, score)| graph.node_id(id).map(|node| (node.to_string(), score)))
        .collect()
}
