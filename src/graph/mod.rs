//! Content knowledge graph
//!
//! This module implements the content data model:
//! - Typed nodes (books, topics, cultural entities) with well-known and open properties
//! - Directed, typed, weighted relations, one per ordered node pair
//! - In-memory storage with a lazily built CSR view for traversal algorithms

pub mod node;
pub mod property;
pub mod relation;
pub mod seed;
pub mod store;
pub mod types;

// Re-export main types
pub use node::{ContentNode, NodeProperties, DEFAULT_DIFFICULTY, DEFAULT_ENGAGEMENT};
pub use property::{keys, PropertyMap, PropertyValue};
pub use relation::{ContentRelation, EdgeData};
pub use seed::{sample_catalog, GraphSeed};
pub use store::{GraphError, GraphResult, GraphStatistics, KnowledgeGraph};
pub use types::{NodeType, RelationType};
