//! Readgraph
//!
//! Content knowledge graph and multi-objective recommendation engine for a
//! reading platform.
//!
//! # Architecture
//!
//! - [`graph`]: books, topics and cultural entities linked by typed, weighted relations
//! - [`algo`]: decayed multi-hop related-content search, difficulty-constrained
//!   learning paths and cultural-context lookup
//! - [`recommend`]: feature extraction, per-objective scoring, weighted
//!   aggregation, explanations and ranking
//!
//! Everything is a synchronous, in-memory computation. The graph is read-only
//! once seeded, so one `Arc<KnowledgeGraph>` can serve concurrent requests.
//!
//! ## Example Usage
//!
//! ```rust
//! use readgraph::graph::{sample_catalog, KnowledgeGraph};
//! use readgraph::recommend::{Recommender, UserContext};
//! use std::sync::Arc;
//!
//! let graph = Arc::new(KnowledgeGraph::from_seed(&sample_catalog()).unwrap());
//! let recommender = Recommender::new(graph).unwrap();
//!
//! let context = UserContext::new()
//!     .with_history(["book_001"])
//!     .with_cultural_preferences(["Amis"]);
//!
//! let recs = recommender.recommend("user_1", &context, &["book_002", "book_003"], 5);
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].rank, 1);
//!
//! let path = recommender.find_learning_path("book_001", "book_003");
//! assert_eq!(path, vec!["book_001", "book_002", "book_003"]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod recommend;

// Re-export main types for convenience
pub use graph::{
    sample_catalog, ContentNode, ContentRelation, GraphError, GraphResult, GraphSeed,
    GraphStatistics, KnowledgeGraph, NodeType, PropertyMap, PropertyValue, RelationType,
};

pub use algo::{find_learning_path, find_related_content, get_cultural_context, CulturalContext};

pub use recommend::{
    AdvancedRecommendation, ContentFeatures, Counterfactual, Explainer, Explanation,
    Recommender, RecommenderConfig, RecommenderError, RecommenderHandle, RecommenderResult,
    UserContext,
};

pub use readgraph_optimization::{Objective, ObjectiveError, ObjectiveSet};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
