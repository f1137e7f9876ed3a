pub mod common;
pub mod pathfinding;
pub mod traversal;

pub use common::{GraphView, NodeId, TypeCode};
pub use pathfinding::{bfs, dijkstra, PathResult};
pub use traversal::{decayed_traversal, TraversalConfig};
