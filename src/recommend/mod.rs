//! Multi-objective content recommendation
//!
//! Candidates are turned into [`ContentFeatures`] against a user's context,
//! scored per objective, aggregated with the active [`ObjectiveSet`] weights,
//! explained from the knowledge graph and ranked.
//!
//! Missing data never fails a request: unknown content ids, empty history and
//! absent node properties all map to documented neutral values. Only malformed
//! objective definitions and unreadable configuration are errors.
//!
//! [`ObjectiveSet`]: readgraph_optimization::ObjectiveSet

pub mod config;
pub mod context;
pub mod explain;
pub mod features;
pub mod objectives;
pub mod recommender;

use crate::graph::GraphError;
use readgraph_optimization::ObjectiveError;
use std::path::PathBuf;
use thiserror::Error;

pub use config::{load_catalog, RecommenderConfig};
pub use context::UserContext;
pub use explain::{Counterfactual, DifficultyMatch, Explainer, Explanation, RelatedItem};
pub use features::{ContentFeatures, FeatureExtractor};
pub use objectives::{
    confidence, default_objectives, difficulty_match, objective_catalog, DifficultyPreference,
    ObjectiveInfo, ObjectiveKind,
};
pub use recommender::{AdvancedRecommendation, Recommender, RecommenderHandle};

/// Recommender errors
#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Objective error: {0}")]
    Objective(#[from] ObjectiveError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type RecommenderResult<T> = Result<T, RecommenderError>;
