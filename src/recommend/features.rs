//! Candidate feature extraction
//!
//! A [`FeatureExtractor`] is built once per request. It walks the graph from
//! the user's recent history up front, so scoring many candidates only does
//! map lookups.

use super::config::RecommenderConfig;
use super::context::UserContext;
use crate::algo::{find_related_content, get_cultural_context};
use crate::graph::KnowledgeGraph;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Feature vector of one candidate for one user; every value is in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentFeatures {
    pub content_id: String,
    pub difficulty: f64,
    pub relevance: f64,
    pub cultural_match: f64,
    pub novelty: f64,
    pub engagement_potential: f64,
}

impl ContentFeatures {
    /// Features of a content id missing from the graph
    pub fn neutral(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            difficulty: 0.5,
            relevance: 0.0,
            cultural_match: 0.0,
            novelty: 0.5,
            engagement_potential: 0.5,
        }
    }
}

/// Per-request feature extractor
pub struct FeatureExtractor<'a> {
    graph: &'a KnowledgeGraph,
    context: &'a UserContext,

    /// Best decayed score of each node reachable from the relevance window
    relevance: HashMap<String, f64>,

    /// Ids in the novelty window
    recently_read: HashSet<&'a str>,

    /// Scores of each node reachable from the novelty window, one per history item reaching it
    familiarity: HashMap<String, Vec<f64>>,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(graph: &'a KnowledgeGraph, config: &RecommenderConfig, context: &'a UserContext) -> Self {
        let mut relevance: HashMap<String, f64> = HashMap::new();
        let traversal = config.relevance_traversal();
        for hist_id in context.recent(config.relevance_window) {
            for (id, score) in find_related_content(graph, hist_id, None, &traversal) {
                let best = relevance.entry(id).or_insert(0.0);
                *best = best.max(score);
            }
        }

        let novelty_window = context.recent(config.novelty_window);
        let recently_read = novelty_window.iter().map(String::as_str).collect();

        let mut familiarity: HashMap<String, Vec<f64>> = HashMap::new();
        let traversal = config.novelty_traversal();
        for hist_id in novelty_window {
            for (id, score) in find_related_content(graph, hist_id, None, &traversal) {
                familiarity.entry(id).or_default().push(score);
            }
        }

        debug!(
            "User profile: {} relevant, {} familiar nodes from {} history items",
            relevance.len(),
            familiarity.len(),
            context.history.len()
        );

        Self {
            graph,
            context,
            relevance,
            recently_read,
            familiarity,
        }
    }

    /// Feature vector of `content_id`; unknown ids get [`ContentFeatures::neutral`]
    pub fn extract(&self, content_id: &str) -> ContentFeatures {
        let Some(node) = self.graph.get_node(content_id) else {
            return ContentFeatures::neutral(content_id);
        };

        ContentFeatures {
            content_id: content_id.to_string(),
            difficulty: node.difficulty().clamp(0.0, 1.0),
            relevance: self.relevance(content_id),
            cultural_match: self.cultural_match(content_id),
            novelty: self.novelty(content_id),
            engagement_potential: node.engagement().clamp(0.0, 1.0),
        }
    }

    /// Strongest connection from the relevance window; 0.5 without history
    fn relevance(&self, content_id: &str) -> f64 {
        if self.context.history.is_empty() {
            return 0.5;
        }
        self.relevance
            .get(content_id)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }

    /// Jaccard overlap of content cultures with preferred cultures
    fn cultural_match(&self, content_id: &str) -> f64 {
        let preferences = &self.context.cultural_preferences;
        if preferences.is_empty() {
            return 0.5;
        }

        let context = get_cultural_context(self.graph, content_id);
        let cultures = context.culture_set();
        if cultures.is_empty() {
            return 0.3;
        }

        let intersection = cultures
            .iter()
            .filter(|c| preferences.contains(**c))
            .count();
        let union = cultures.len() + preferences.len() - intersection;

        intersection as f64 / union as f64
    }

    /// 0.0 for recently read content, otherwise one minus mean familiarity
    fn novelty(&self, content_id: &str) -> f64 {
        if self.context.history.is_empty() {
            return 1.0;
        }
        if self.recently_read.contains(content_id) {
            return 0.0;
        }

        match self.familiarity.get(content_id) {
            Some(scores) if !scores.is_empty() => {
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                (1.0 - mean).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }
}
