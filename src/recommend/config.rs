//! Recommender configuration

use super::objectives::default_objectives;
use super::{RecommenderError, RecommenderResult};
use crate::graph::{GraphSeed, KnowledgeGraph};
use readgraph_algorithms::TraversalConfig;
use readgraph_optimization::{Objective, ObjectiveSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Tunables of the recommender
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Active objectives, in aggregation order
    pub objectives: Vec<Objective>,

    /// Per-hop score decay of multi-hop traversal, in (0, 1]
    pub decay: f64,

    /// Number of most recent history items used for relevance
    pub relevance_window: usize,
    pub relevance_hops: usize,
    pub relevance_limit: usize,

    /// Number of most recent history items used for novelty
    pub novelty_window: usize,
    pub novelty_hops: usize,
    pub novelty_limit: usize,

    /// Number of most recent history items searched for explanation paths
    pub explain_window: usize,
    /// Longest history-to-candidate path (in hops) cited in an explanation
    pub explain_max_hops: usize,

    /// Proficiency assumed when the user context carries none
    pub default_proficiency: f64,
    /// Width of the ideal difficulty zone above the user's level
    pub difficulty_band: f64,
    /// Score lost per unit of difficulty above the ideal zone
    pub too_hard_slope: f64,

    /// Default bound on difficulty increase between learning-path steps
    pub max_difficulty_jump: f64,

    /// Score candidates on the rayon pool
    pub parallel: bool,
    /// Smallest batch scored in parallel
    pub parallel_threshold: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            objectives: default_objectives(),
            decay: 0.7,
            relevance_window: 5,
            relevance_hops: 2,
            relevance_limit: 20,
            novelty_window: 10,
            novelty_hops: 1,
            novelty_limit: 50,
            explain_window: 3,
            explain_max_hops: 3,
            default_proficiency: 0.5,
            difficulty_band: 0.2,
            too_hard_slope: 2.0,
            max_difficulty_jump: 0.3,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl RecommenderConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> RecommenderResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RecommenderResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RecommenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading recommender config from {}", path.display());
        Self::from_yaml_str(&yaml)
    }

    /// Validated objective set
    pub fn objective_set(&self) -> RecommenderResult<ObjectiveSet> {
        Ok(ObjectiveSet::new(self.objectives.clone())?)
    }

    pub fn validate(&self) -> RecommenderResult<()> {
        self.objective_set()?;

        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(invalid(format!("decay must be in (0, 1], got {}", self.decay)));
        }

        let counts = [
            ("relevance_window", self.relevance_window),
            ("relevance_hops", self.relevance_hops),
            ("relevance_limit", self.relevance_limit),
            ("novelty_window", self.novelty_window),
            ("novelty_hops", self.novelty_hops),
            ("novelty_limit", self.novelty_limit),
            ("explain_window", self.explain_window),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(invalid(format!("{} must be greater than 0", name)));
        }

        if !(0.0..=1.0).contains(&self.default_proficiency) {
            return Err(invalid(format!(
                "default_proficiency must be in [0, 1], got {}",
                self.default_proficiency
            )));
        }

        let non_negative = [
            ("difficulty_band", self.difficulty_band),
            ("too_hard_slope", self.too_hard_slope),
            ("max_difficulty_jump", self.max_difficulty_jump),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be finite and non-negative, got {}", name, value)));
            }
        }

        Ok(())
    }

    /// Traversal used to score relevance from one history item
    pub fn relevance_traversal(&self) -> TraversalConfig {
        TraversalConfig {
            max_hops: self.relevance_hops,
            decay: self.decay,
            limit: self.relevance_limit,
        }
    }

    /// Traversal used to score familiarity from one history item
    pub fn novelty_traversal(&self) -> TraversalConfig {
        TraversalConfig {
            max_hops: self.novelty_hops,
            decay: self.decay,
            limit: self.novelty_limit,
        }
    }
}

/// Read a JSON catalog file and seed a graph from it
pub fn load_catalog(path: impl AsRef<Path>) -> RecommenderResult<KnowledgeGraph> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| RecommenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let seed = GraphSeed::from_json_str(&json)?;
    Ok(KnowledgeGraph::from_seed(&seed)?)
}

fn invalid(message: String) -> RecommenderError {
    RecommenderError::InvalidConfig(message)
}
