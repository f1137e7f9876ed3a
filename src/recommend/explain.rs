//! Recommendation explanations
//!
//! Two kinds of explanation are produced from the same graph and scores:
//! - [`Explanation`]: why a candidate fits the user (history paths, shared
//!   cultures, difficulty fit)
//! - [`Counterfactual`]: which objectives hold a candidate back and what the
//!   user could change

use super::config::RecommenderConfig;
use super::context::UserContext;
use super::features::ContentFeatures;
use super::objectives::{DifficultyPreference, ObjectiveKind};
use super::recommender::AdvancedRecommendation;
use crate::algo::{get_cultural_context, shortest_hop_path};
use crate::graph::KnowledgeGraph;
use indexmap::IndexMap;
use readgraph_optimization::ObjectiveSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Objectives scoring below this are considered weak
const WEAK_SCORE: f64 = 0.5;

/// Score a weak objective is assumed to reach when estimating improvement
const TARGET_SCORE: f64 = 0.8;

/// Number of weak objectives that get a suggestion
const MAX_SUGGESTIONS: usize = 2;

/// Objective scores above this are called out as strengths in a summary
const HIGH_SCORE: f64 = 0.7;

/// Objective scores below this are called out as weaknesses in a summary
const LOW_SCORE: f64 = 0.3;

/// Fit of content difficulty to the user's proficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyMatch {
    Perfect,
    Good,
    Challenging,
}

impl DifficultyMatch {
    /// Classify by absolute difference between difficulty and proficiency
    pub fn classify(delta: f64) -> Self {
        if delta < 0.1 {
            DifficultyMatch::Perfect
        } else if delta < 0.2 {
            DifficultyMatch::Good
        } else {
            DifficultyMatch::Challenging
        }
    }

    pub fn matches_proficiency(self) -> bool {
        matches!(self, DifficultyMatch::Perfect | DifficultyMatch::Good)
    }
}

/// A history item connected to the candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedItem {
    pub content: String,
    pub path_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub content_id: String,
    pub reasons: Vec<String>,
    pub related_to: Vec<RelatedItem>,
    pub cultural_relevance: Vec<String>,
    pub difficulty_match: Option<DifficultyMatch>,
}

/// "What would have to change" feedback for one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Counterfactual {
    pub content_id: String,
    pub current_score: f64,
    /// Objectives scoring below 0.5, weakest first
    pub weak_objectives: IndexMap<String, f64>,
    pub suggestions: Vec<String>,
    pub potential_score_improvement: f64,
}

/// Builds explanations against one graph and configuration
#[derive(Debug, Clone, Copy)]
pub struct Explainer<'a> {
    graph: &'a KnowledgeGraph,
    config: &'a RecommenderConfig,
}

impl<'a> Explainer<'a> {
    pub fn new(graph: &'a KnowledgeGraph, config: &'a RecommenderConfig) -> Self {
        Self { graph, config }
    }

    /// Why `content_id` suits the user. Unknown ids get an empty explanation.
    pub fn explain(&self, content_id: &str, context: &UserContext) -> Explanation {
        let mut explanation = Explanation {
            content_id: content_id.to_string(),
            ..Default::default()
        };

        let Some(node) = self.graph.get_node(content_id) else {
            return explanation;
        };

        // Most recent first
        for hist_id in context.history.iter().rev().take(self.config.explain_window) {
            let Some(path) = shortest_hop_path(self.graph, hist_id, content_id) else {
                continue;
            };
            let hops = path.len().saturating_sub(1);
            if hops <= self.config.explain_max_hops {
                explanation.related_to.push(RelatedItem {
                    content: hist_id.clone(),
                    path_length: hops,
                });
            }
        }

        explanation.cultural_relevance = get_cultural_context(self.graph, content_id).cultures;

        let level = context.proficiency_or(self.config.default_proficiency);
        let difficulty_match = DifficultyMatch::classify((node.difficulty() - level).abs());
        explanation.difficulty_match = Some(difficulty_match);

        if !explanation.related_to.is_empty() {
            explanation.reasons.push(format!(
                "Related to {} items you've read",
                explanation.related_to.len()
            ));
        }
        if !explanation.cultural_relevance.is_empty() {
            explanation.reasons.push(format!(
                "Relevant to {} culture",
                explanation.cultural_relevance.join(", ")
            ));
        }
        if difficulty_match.matches_proficiency() {
            explanation
                .reasons
                .push("Difficulty level matches your current proficiency".to_string());
        }

        explanation
    }

    /// Weak objectives of a scored candidate and how to strengthen them.
    ///
    /// `scores` are raw objective scores aligned with `objectives`.
    pub fn counterfactual(
        &self,
        features: &ContentFeatures,
        objectives: &ObjectiveSet,
        scores: &[f64],
        preference: &DifficultyPreference,
    ) -> Counterfactual {
        let mut weak: Vec<(&str, f64, f64)> = objectives
            .iter()
            .zip(scores)
            .filter(|(_, &score)| score < WEAK_SCORE)
            .map(|(obj, &score)| (obj.name.as_str(), score, obj.weight))
            .collect();
        weak.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let suggestions = weak
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|(name, _, _)| suggestion(name, features, preference))
            .collect();

        let potential_score_improvement = weak
            .iter()
            .map(|(_, score, weight)| (TARGET_SCORE - score) * weight)
            .sum();

        Counterfactual {
            content_id: features.content_id.clone(),
            current_score: objectives.aggregate(scores),
            weak_objectives: weak
                .iter()
                .map(|(name, score, _)| (name.to_string(), *score))
                .collect(),
            suggestions,
            potential_score_improvement,
        }
    }

    /// One-line reasoning naming notably strong and weak objectives
    pub fn summarize(recommendation: &AdvancedRecommendation) -> String {
        let parts: Vec<String> = recommendation
            .objective_scores
            .iter()
            .filter_map(|(name, &score)| {
                if score > HIGH_SCORE {
                    Some(format!("{} scores high ({:.2})", name, score))
                } else if score < LOW_SCORE {
                    Some(format!("{} scores low ({:.2})", name, score))
                } else {
                    None
                }
            })
            .collect();

        if parts.is_empty() {
            "Recommended on the overall balance of objectives".to_string()
        } else {
            format!("Recommended because: {}", parts.join(", "))
        }
    }
}

fn suggestion(name: &str, features: &ContentFeatures, preference: &DifficultyPreference) -> String {
    match ObjectiveKind::from_name(name) {
        ObjectiveKind::Relevance => "Read more related content to increase relevance".to_string(),
        ObjectiveKind::DifficultyMatch => {
            if features.difficulty > preference.optimal_max() {
                "Build up proficiency with easier content first".to_string()
            } else {
                "This content may be too easy for your level".to_string()
            }
        }
        ObjectiveKind::Novelty => "Explore different topics for more diverse learning".to_string(),
        ObjectiveKind::Engagement => "Try content with higher community engagement".to_string(),
        ObjectiveKind::CulturalResonance => {
            "Add cultural preferences that match this content".to_string()
        }
        ObjectiveKind::Custom(name) => format!("Improve {} to strengthen this recommendation", name),
    }
}
