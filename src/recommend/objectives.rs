//! Built-in objectives and per-objective scoring

use super::features::ContentFeatures;
use readgraph_optimization::{variance, Objective};
use serde::Serialize;

pub const RELEVANCE: &str = "relevance";
pub const DIFFICULTY_MATCH: &str = "difficulty_match";
pub const NOVELTY: &str = "novelty";
pub const ENGAGEMENT: &str = "engagement";
pub const CULTURAL_RESONANCE: &str = "cultural_resonance";

/// Objective scored by the recommender, resolved from its name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    Relevance,
    DifficultyMatch,
    Novelty,
    Engagement,
    CulturalResonance,
    /// Caller-defined objective with no built-in scorer
    Custom(String),
}

impl ObjectiveKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            RELEVANCE => ObjectiveKind::Relevance,
            DIFFICULTY_MATCH => ObjectiveKind::DifficultyMatch,
            NOVELTY => ObjectiveKind::Novelty,
            ENGAGEMENT => ObjectiveKind::Engagement,
            CULTURAL_RESONANCE => ObjectiveKind::CulturalResonance,
            other => ObjectiveKind::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectiveKind::Relevance => RELEVANCE,
            ObjectiveKind::DifficultyMatch => DIFFICULTY_MATCH,
            ObjectiveKind::Novelty => NOVELTY,
            ObjectiveKind::Engagement => ENGAGEMENT,
            ObjectiveKind::CulturalResonance => CULTURAL_RESONANCE,
            ObjectiveKind::Custom(name) => name,
        }
    }

    /// Raw score in [0, 1] before orientation. Custom objectives score 0.0.
    pub fn score(&self, features: &ContentFeatures, preference: &DifficultyPreference) -> f64 {
        match self {
            ObjectiveKind::Relevance => features.relevance,
            ObjectiveKind::DifficultyMatch => preference.score(features.difficulty),
            ObjectiveKind::Novelty => features.novelty,
            ObjectiveKind::Engagement => features.engagement_potential,
            ObjectiveKind::CulturalResonance => features.cultural_match,
            ObjectiveKind::Custom(_) => 0.0,
        }
    }
}

/// Default active objectives
pub fn default_objectives() -> Vec<Objective> {
    vec![
        Objective::new(RELEVANCE, 0.35, true),
        Objective::new(DIFFICULTY_MATCH, 0.25, true),
        Objective::new(NOVELTY, 0.20, true),
        Objective::new(ENGAGEMENT, 0.20, true),
    ]
}

/// Catalog entry of a built-in objective
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub default_weight: f64,
    pub maximize: bool,
}

/// Every built-in objective, including the ones inactive by default
pub fn objective_catalog() -> Vec<ObjectiveInfo> {
    vec![
        ObjectiveInfo {
            name: RELEVANCE,
            description: "Closeness to the user's recent reading in the knowledge graph",
            default_weight: 0.35,
            maximize: true,
        },
        ObjectiveInfo {
            name: DIFFICULTY_MATCH,
            description: "Fit between content difficulty and the user's proficiency",
            default_weight: 0.25,
            maximize: true,
        },
        ObjectiveInfo {
            name: NOVELTY,
            description: "Distance from what the user has recently read",
            default_weight: 0.20,
            maximize: true,
        },
        ObjectiveInfo {
            name: ENGAGEMENT,
            description: "Expected engagement based on historical averages",
            default_weight: 0.20,
            maximize: true,
        },
        ObjectiveInfo {
            name: CULTURAL_RESONANCE,
            description: "Overlap between content cultures and the user's cultural preferences",
            default_weight: 0.0,
            maximize: true,
        },
    ]
}

/// Preferred difficulty zone `[level, level + band]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreference {
    pub level: f64,
    pub band: f64,
    pub slope: f64,
}

impl DifficultyPreference {
    pub fn new(level: f64, band: f64, slope: f64) -> Self {
        Self { level, band, slope }
    }

    pub fn optimal_max(&self) -> f64 {
        self.level + self.band
    }

    pub fn score(&self, difficulty: f64) -> f64 {
        difficulty_match(difficulty, self.level, self.band, self.slope)
    }
}

/// Bell-shaped difficulty preference.
///
/// 1.0 inside `[level, level + band]`; content below the zone earns partial
/// credit rising linearly from 0.5; content above loses `slope` per unit of
/// excess difficulty, floored at 0.0.
pub fn difficulty_match(difficulty: f64, level: f64, band: f64, slope: f64) -> f64 {
    let optimal_min = level;
    let optimal_max = level + band;

    let score = if (optimal_min..=optimal_max).contains(&difficulty) {
        1.0
    } else if difficulty < optimal_min {
        0.5 + (difficulty / optimal_min) * 0.5
    } else {
        (1.0 - (difficulty - optimal_max) * slope).max(0.0)
    };

    score.clamp(0.0, 1.0)
}

/// Confidence in a recommendation, in [0, 1]
///
/// Starts at 0.5, gains 0.1 per explanation reason (at most 0.3), loses
/// `0.2 * variance` of the objective scores (at most 0.2), and gains 0.1 when
/// the candidate is connected to the user's history.
pub fn confidence(objective_scores: &[f64], num_reasons: usize, has_related: bool) -> f64 {
    let mut confidence = 0.5;

    confidence += (num_reasons as f64 * 0.1).min(0.3);
    confidence -= (variance(objective_scores) * 0.2).min(0.2);
    if has_related {
        confidence += 0.1;
    }

    confidence.clamp(0.0, 1.0)
}
