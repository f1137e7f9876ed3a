//! Learning paths and hop-count paths between content items

use crate::graph::KnowledgeGraph;
use readgraph_algorithms::{bfs, dijkstra};
use tracing::{debug, warn};

/// Default bound on the difficulty increase between kept path steps
pub const DEFAULT_MAX_DIFFICULTY_JUMP: f64 = 0.3;

/// Traversal cost of an edge: strong relations are cheap, zero-weight ones impassable
fn inverse_weight(weight: f64) -> Option<f64> {
    (weight > 0.0).then(|| 1.0 / weight)
}

/// Strongest-relation path from `start_id` to `end_id` with difficulty filtering.
///
/// The path minimises the sum of `1 / weight` over its edges. Walking it in
/// order, the start is always kept; each later node is kept only when its
/// difficulty exceeds that of the last kept node by at most `max_difficulty_jump`.
/// Skipped nodes are logged. Kept neighbours need not be adjacent in the graph
/// once a node has been skipped.
///
/// Unknown ids or unreachable targets yield `[]`.
pub fn find_learning_path(
    graph: &KnowledgeGraph,
    start_id: &str,
    end_id: &str,
    max_difficulty_jump: f64,
) -> Vec<String> {
    let (Some(source), Some(target)) = (graph.algo_id(start_id), graph.algo_id(end_id)) else {
        return Vec::new();
    };

    let Some(result) = dijkstra(graph.view(), source, target, inverse_weight) else {
        warn!("No path found from {} to {}", start_id, end_id);
        return Vec::new();
    };
    debug!(
        "Shortest path {} -> {}: {} hops, cost {:.3}",
        start_id,
        end_id,
        result.hops(),
        result.cost
    );

    let difficulty = |id: &str| graph.get_node(id).map(|n| n.difficulty());

    let mut filtered: Vec<String> = Vec::with_capacity(result.path.len());
    let mut prev_difficulty = 0.0;

    for algo_id in result.path {
        let Some(id) = graph.node_id(algo_id) else {
            continue;
        };
        let Some(curr_difficulty) = difficulty(id) else {
            continue;
        };

        if filtered.is_empty() || curr_difficulty - prev_difficulty <= max_difficulty_jump {
            filtered.push(id.to_string());
            prev_difficulty = curr_difficulty;
        } else {
            warn!(
                "Skipping {}: difficulty jump too large ({:.2} -> {:.2})",
                id, prev_difficulty, curr_difficulty
            );
        }
    }

    filtered
}

/// Fewest-hops path from `from_id` to `to_id`, endpoints included
pub fn shortest_hop_path(graph: &KnowledgeGraph, from_id: &str, to_id: &str) -> Option<Vec<String>> {
    let source = graph.algo_id(from_id)?;
    let target = graph.algo_id(to_id)?;

    let result = bfs(graph.view(), source, target)?;
    result
        .path
        .into_iter()
        .map(|id| graph.node_id(id).map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{sample_catalog, ContentNode, ContentRelation};

    fn sample() -> KnowledgeGraph {
        KnowledgeGraph::from_seed(&sample_catalog()).unwrap()
    }

    #[test]
    fn test_learning_path_within_jump() {
        let graph = sample();
        let path = find_learning_path(&graph, "book_001", "book_003", DEFAULT_MAX_DIFFICULTY_JUMP);
        assert_eq!(path, vec!["book_001", "book_002", "book_003"]);
    }

    #[test]
    fn test_learning_path_skips_large_jump() {
        let graph = sample();
        // Both later steps exceed a 0.1 bound relative to book_001
        let path = find_learning_path(&graph, "book_001", "book_003", 0.1);
        assert_eq!(path, vec!["book_001"]);
    }

    #[test]
    fn test_skipped_node_breaks_adjacency() {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(ContentNode::new("a", "book").with_difficulty(0.2));
        graph.add_node(ContentNode::new("b", "book").with_difficulty(0.9));
        graph.add_node(ContentNode::new("c", "book").with_difficulty(0.4));
        graph.add_relation(ContentRelation::new("a", "b", "prerequisite")).unwrap();
        graph.add_relation(ContentRelation::new("b", "c", "prerequisite")).unwrap();

        let path = find_learning_path(&graph, "a", "c", 0.3);
        assert_eq!(path, vec!["a", "c"]);
        assert!(graph.relation("a", "c").is_none());
    }

    #[test]
    fn test_prefers_strong_relations() {
        let mut graph = KnowledgeGraph::new();
        for id in ["s", "weak", "x", "y", "t"] {
            graph.add_node(ContentNode::new(id, "concept"));
        }
        // Direct two-hop route through weak links: cost 10 + 10
        graph.add_relation(ContentRelation::weighted("s", "weak", "related", 0.1)).unwrap();
        graph.add_relation(ContentRelation::weighted("weak", "t", "related", 0.1)).unwrap();
        // Three strong hops: cost 3
        graph.add_relation(ContentRelation::new("s", "x", "related")).unwrap();
        graph.add_relation(ContentRelation::new("x", "y", "related")).unwrap();
        graph.add_relation(ContentRelation::new("y", "t", "related")).unwrap();

        assert_eq!(find_learning_path(&graph, "s", "t", 1.0), vec!["s", "x", "y", "t"]);
        assert_eq!(
            shortest_hop_path(&graph, "s", "t"),
            Some(vec!["s".to_string(), "weak".to_string(), "t".to_string()])
        );
    }

    #[test]
    fn test_no_path_and_unknown_ids() {
        let graph = sample();
        assert!(find_learning_path(&graph, "book_003", "book_001", 0.3).is_empty());
        assert!(find_learning_path(&graph, "missing", "book_001", 0.3).is_empty());
        assert!(find_learning_path(&graph, "book_001", "missing", 0.3).is_empty());
        assert_eq!(shortest_hop_path(&graph, "book_003", "book_001"), None);
    }

    #[test]
    fn test_zero_weight_is_impassable() {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(ContentNode::new("a", "book"));
        graph.add_node(ContentNode::new("b", "book"));
        graph.add_relation(ContentRelation::weighted("a", "b", "related", 0.0)).unwrap();

        assert!(find_learning_path(&graph, "a", "b", 0.3).is_empty());
        assert_eq!(shortest_hop_path(&graph, "a", "b").map(|p| p.len()), Some(2));
    }
}
