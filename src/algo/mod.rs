//! Relevance and context extractors
//!
//! Traversal primitives live in the `readgraph-algorithms` crate and operate on
//! a dense [`GraphView`](readgraph_algorithms::GraphView). This module is the
//! adapter layer: it maps string content ids and relation types onto the view
//! and maps results back.

pub mod context;
pub mod pathfinding;
pub mod related;

// Re-export algorithms
pub use readgraph_algorithms::{bfs, decayed_traversal, dijkstra, PathResult, TraversalConfig};

pub use context::{get_cultural_context, CulturalContext};
pub use pathfinding::{find_learning_path, shortest_hop_path, DEFAULT_MAX_DIFFICULTY_JUMP};
pub use related::find_related_content;
