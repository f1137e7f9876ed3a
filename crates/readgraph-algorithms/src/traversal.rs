//! Multi-hop traversal with geometric score decay
//!
//! Breadth-first expansion from a source node where every hop multiplies the
//! running score by the edge weight and a constant decay factor. A node reached
//! over `h` edges of weight 1.0 therefore scores `decay^h`.

use super::common::{GraphView, NodeId, TypeCode};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};

/// Decayed traversal configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalConfig {
    /// Maximum number of edges walked from the source
    pub max_hops: usize,
    /// Per-hop decay multiplier
    pub decay: f64,
    /// Maximum number of results returned
    pub limit: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_hops: 2,
            decay: 0.7,
            limit: 10,
        }
    }
}

/// Score every node reachable from `source` within `config.max_hops` hops.
///
/// Each node keeps the best score over all examined edges. Nodes are expanded
/// once, in discovery order, using the best score recorded for them at
/// expansion time. The source is never part of the result. Results are sorted
/// by score descending; equal scores keep discovery order.
///
/// When `allowed_types` is given, edges whose type code is not in
/// the set are ignored. An unknown source yields an empty result.
pub fn decayed_traversal(
    view: &GraphView,
    source: NodeId,
    config: &TraversalConfig,
    allowed_types: Option<&HashSet<TypeCode>>,
) -> Vec<(NodeId, f64)> {
    let Some(&source_idx) = view.node_to_index.get(&source) else {
        return Vec::new();
    };

    // Discovery-ordered (index, best score) pairs plus a position lookup
    let mut found: Vec<(usize, f64)> = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(source_idx);
    queue.push_back((source_idx, 0usize));

    while let Some((current_idx, hops)) = queue.pop_front() {
        if hops >= config.max_hops {
            continue;
        }

        let score = match position.get(&current_idx) {
            Some(&pos) => found[pos].1,
            None => 1.0,
        };

        for (i, &next_idx) in view.successors(current_idx).iter().enumerate() {
            if allowed_types.is_some_and(|allowed| !allowed.contains(&view.edge_type(current_idx, i))) {
                continue;
            }

            let weight = view.edge_weight(current_idx, i);
            if !weight.is_finite() || weight < 0.0 {
                continue;
            }

            if next_idx != source_idx {
                let new_score = score * weight * config.decay;
                match position.get(&next_idx) {
                    Some(&pos) => {
                        if new_score > found[pos].1 {
                            found[pos].1 = new_score;
                        }
                    }
                    None => {
                        position.insert(next_idx, found.len());
                        found.push((next_idx, new_score));
                    }
                }
            }

            if visited.insert(next_idx) {
                queue.push_back((next_idx, hops + 1));
            }
        }
    }

    found.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    found.truncate(config.limit);

    found
        .into_iter()
        .map(|(idx, score)| (view.index_to_node[idx], score))
        .collect()
}
