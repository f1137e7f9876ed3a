//! Shortest paths over a [`GraphView`]
//!
//! [`bfs`] counts hops; [`dijkstra`] takes the edge cost from a caller-supplied
//! function of the edge weight, so a strength graph can be searched by
//! `1 / weight` without rebuilding the view.

use super::common::{GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// A path between two nodes and its total cost
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

impl PathResult {
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Walk `parent` links back from `target_idx`; the source has no parent
fn trace_back(view: &GraphView, target_idx: usize, parent: &[Option<usize>]) -> Vec<NodeId> {
    let mut path = vec![view.index_to_node[target_idx]];
    let mut curr = target_idx;
    while let Some(prev) = parent[curr] {
        path.push(view.index_to_node[prev]);
        curr = prev;
    }
    path.reverse();
    path
}

/// Fewest-hops path from `source` to `target`.
///
/// Neighbors are explored in edge order, so among equally short paths the one
/// using earlier edges wins. `None` when either id is unknown or the target is
/// unreachable.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut parent = vec![None; view.node_count];
    let mut seen = vec![false; view.node_count];
    let mut queue = VecDeque::from([source_idx]);
    seen[source_idx] = true;

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let path = trace_back(view, target_idx, &parent);
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if !seen[next_idx] {
                seen[next_idx] = true;
                parent[next_idx] = Some(current_idx);
                queue.push_back(next_idx);
            }
        }
    }

    None
}

/// Min-heap entry
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    node_idx: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; lower index wins ties
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `source` to `target`.
///
/// `edge_cost` maps an edge weight to a traversal cost. Returning `None`, a
/// negative or a non-finite cost makes the edge impassable.
pub fn dijkstra<F>(view: &GraphView, source: NodeId, target: NodeId, edge_cost: F) -> Option<PathResult>
where
    F: Fn(f64) -> Option<f64>,
{
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut dist = vec![f64::INFINITY; view.node_count];
    let mut parent = vec![None; view.node_count];
    let mut heap = BinaryHeap::from([Frontier { cost: 0.0, node_idx: source_idx }]);
    dist[source_idx] = 0.0;

    while let Some(Frontier { cost, node_idx }) = heap.pop() {
        if node_idx == target_idx {
            return Some(PathResult {
                source,
                target,
                path: trace_back(view, target_idx, &parent),
                cost,
            });
        }
        if cost > dist[node_idx] {
            continue;
        }

        let weights = view.weights(node_idx);
        for (&next_idx, &weight) in view.successors(node_idx).iter().zip(weights) {
            let Some(step) = edge_cost(weight).filter(|c| c.is_finite() && *c >= 0.0) else {
                continue;
            };

            let next_cost = cost + step;
            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some(node_idx);
                heap.push(Frontier { cost: next_cost, node_idx: next_idx });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfs() {
        // 0->1->2
        let view = GraphView::from_edges(3, &[(0, 1, 1.0, 0), (1, 2, 1.0, 0)]);

        let result = bfs(&view, 0, 2).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.cost, 2.0);
        assert_eq!(result.hops(), 2);
    }

    #[test]
    fn test_bfs_unreachable_and_unknown() {
        let view = GraphView::from_edges(3, &[(0, 1, 1.0, 0)]);
        assert!(bfs(&view, 0, 2).is_none());
        assert!(bfs(&view, 0, 99).is_none());
    }

    #[test]
    fn test_bfs_source_is_target() {
        let view = GraphView::from_edges(2, &[(0, 1, 1.0, 0)]);
        let result = bfs(&view, 1, 1).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.hops(), 0);
    }

    #[test]
    fn test_dijkstra_weight_as_cost() {
        // 0->1 (10.0), 1->2 (5.0), 0->2 (50.0)
        let view = GraphView::from_edges(3, &[(0, 1, 10.0, 0), (0, 2, 50.0, 0), (1, 2, 5.0, 0)]);

        let result = dijkstra(&view, 0, 2, Some).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.cost, 15.0);
    }

    #[test]
    fn test_dijkstra_inverse_weight_prefers_strong_edges() {
        // 0->2 is weak (0.1, cost 10); 0->1->2 is strong (cost 1 + 1)
        let view = GraphView::from_edges(3, &[(0, 2, 0.1, 0), (0, 1, 1.0, 0), (1, 2, 1.0, 0)]);

        let inverse = |w: f64| if w > 0.0 { Some(1.0 / w) } else { None };
        let result = dijkstra(&view, 0, 2, inverse).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert!((result.cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bfs_prefers_earlier_edges() {
        // Two 2-hop routes to 3; the one through 1 comes first
        let view = GraphView::from_edges(4, &[(0, 1, 1.0, 0), (0, 2, 1.0, 0), (2, 3, 1.0, 0), (1, 3, 1.0, 0)]);
        assert_eq!(bfs(&view, 0, 3).unwrap().path, vec![0, 1, 3]);
    }

    #[test]
    fn test_dijkstra_skips_impassable_edges() {
        let view = GraphView::from_edges(2, &[(0, 1, 0.0, 0)]);
        let inverse = |w: f64| if w > 0.0 { Some(1.0 / w) } else { None };
        assert!(dijkstra(&view, 0, 1, inverse).is_none());
    }
}
