//! Recommender facade
//!
//! [`Recommender`] is an explicitly constructed service: it shares an
//! immutable [`KnowledgeGraph`] and owns its objective weights. Weight updates
//! either mutate a recommender the caller owns exclusively
//! ([`Recommender::adjust_weights`]) or produce a new snapshot
//! ([`Recommender::with_adjusted_weights`]). [`RecommenderHandle`] swaps
//! snapshots under a lock so in-flight requests keep the weights they started
//! with.

use super::config::RecommenderConfig;
use super::context::UserContext;
use super::explain::{Counterfactual, Explainer, Explanation};
use super::features::{ContentFeatures, FeatureExtractor};
use super::objectives::{confidence, DifficultyPreference, ObjectiveKind};
use super::RecommenderResult;
use crate::algo::{find_learning_path, find_related_content, TraversalConfig};
use crate::graph::{GraphStatistics, KnowledgeGraph};
use indexmap::IndexMap;
use rayon::prelude::*;
use readgraph_optimization::{non_dominated_fronts, Objective, ObjectiveSet};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedRecommendation {
    pub content_id: String,
    /// Weighted aggregate of the objective scores, in [0, 1]
    pub overall_score: f64,
    /// Raw score of every active objective, in objective order
    pub objective_scores: IndexMap<String, f64>,
    pub explanation: Explanation,
    pub confidence: f64,
    /// 1-based position in the result list
    pub rank: usize,
}

/// Multi-objective recommender over a shared knowledge graph
#[derive(Debug, Clone)]
pub struct Recommender {
    graph: Arc<KnowledgeGraph>,
    objectives: ObjectiveSet,
    config: Arc<RecommenderConfig>,
}

impl Recommender {
    /// Recommender with the default configuration and objectives
    pub fn new(graph: Arc<KnowledgeGraph>) -> RecommenderResult<Self> {
        Self::with_config(graph, RecommenderConfig::default())
    }

    /// Recommender with explicit objectives and otherwise default configuration
    pub fn with_objectives(
        graph: Arc<KnowledgeGraph>,
        objectives: Vec<Objective>,
    ) -> RecommenderResult<Self> {
        Self::with_config(
            graph,
            RecommenderConfig {
                objectives,
                ..Default::default()
            },
        )
    }

    /// Validate `config` and build a recommender from it
    pub fn with_config(graph: Arc<KnowledgeGraph>, config: RecommenderConfig) -> RecommenderResult<Self> {
        config.validate()?;
        let objectives = config.objective_set()?;

        info!(
            "Recommender ready: {} nodes, objectives {:?}",
            graph.node_count(),
            objectives.names()
        );

        Ok(Self {
            graph,
            objectives,
            config: Arc::new(config),
        })
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn objectives(&self) -> &ObjectiveSet {
        &self.objectives
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    fn preference(&self, context: &UserContext) -> DifficultyPreference {
        DifficultyPreference::new(
            context.proficiency_or(self.config.default_proficiency),
            self.config.difficulty_band,
            self.config.too_hard_slope,
        )
    }

    /// Raw scores of the active objectives, in objective order
    fn objective_scores(&self, features: &ContentFeatures, preference: &DifficultyPreference) -> Vec<f64> {
        self.objectives
            .iter()
            .map(|obj| {
                ObjectiveKind::from_name(&obj.name)
                    .score(features, preference)
                    .clamp(0.0, 1.0)
            })
            .collect()
    }

    fn evaluate(
        &self,
        extractor: &FeatureExtractor<'_>,
        explainer: &Explainer<'_>,
        preference: &DifficultyPreference,
        context: &UserContext,
        content_id: &str,
    ) -> AdvancedRecommendation {
        let features = extractor.extract(content_id);
        let scores = self.objective_scores(&features, preference);
        let overall_score = self.objectives.aggregate(&scores).clamp(0.0, 1.0);
        let explanation = explainer.explain(content_id, context);
        let confidence = confidence(
            &scores,
            explanation.reasons.len(),
            !explanation.related_to.is_empty(),
        );

        AdvancedRecommendation {
            content_id: content_id.to_string(),
            overall_score,
            objective_scores: self
                .objectives
                .iter()
                .map(|obj| obj.name.clone())
                .zip(scores)
                .collect(),
            explanation,
            confidence,
            rank: 0,
        }
    }

    /// Rank `candidate_ids` for a user and return the best `top_k`.
    ///
    /// Sorting is stable, so equal scores keep candidate order. Unknown
    /// candidates are scored with neutral features rather than rejected.
    pub fn recommend<S>(
        &self,
        user_id: &str,
        context: &UserContext,
        candidate_ids: &[S],
        top_k: usize,
    ) -> Vec<AdvancedRecommendation>
    where
        S: AsRef<str> + Sync,
    {
        if candidate_ids.is_empty() {
            return Vec::new();
        }

        let extractor = FeatureExtractor::new(&self.graph, &self.config, context);
        let explainer = Explainer::new(&self.graph, &self.config);
        let preference = self.preference(context);
        let evaluate = |id: &S| self.evaluate(&extractor, &explainer, &preference, context, id.as_ref());

        let parallel = self.config.parallel && candidate_ids.len() >= self.config.parallel_threshold;
        let mut recommendations: Vec<AdvancedRecommendation> = if parallel {
            candidate_ids.par_iter().map(evaluate).collect()
        } else {
            candidate_ids.iter().map(evaluate).collect()
        };

        recommendations.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(Ordering::Equal)
        });
        recommendations.truncate(top_k);
        for (i, rec) in recommendations.iter_mut().enumerate() {
            rec.rank = i + 1;
        }

        debug!(
            "Recommended {} of {} candidates for user {} (parallel: {})",
            recommendations.len(),
            candidate_ids.len(),
            user_id,
            parallel
        );

        recommendations
    }

    /// Why `content_id` suits the user
    pub fn explain_recommendation(&self, content_id: &str, user_id: &str, context: &UserContext) -> Explanation {
        debug!("Explaining {} for user {}", content_id, user_id);
        Explainer::new(&self.graph, &self.config).explain(content_id, context)
    }

    /// What would have to change for `content_id` to rank higher
    pub fn counterfactual_explain(&self, content_id: &str, user_id: &str, context: &UserContext) -> Counterfactual {
        debug!("Counterfactual for {} and user {}", content_id, user_id);

        let features = FeatureExtractor::new(&self.graph, &self.config, context).extract(content_id);
        let preference = self.preference(context);
        let scores = self.objective_scores(&features, &preference);

        Explainer::new(&self.graph, &self.config).counterfactual(&features, &self.objectives, &scores, &preference)
    }

    /// Group recommendations into non-dominated fronts over their objective scores.
    ///
    /// Minimized objectives are inverted first. The first front holds the
    /// recommendations no other one beats on every objective.
    pub fn pareto_fronts(&self, recommendations: &[AdvancedRecommendation]) -> Vec<Vec<String>> {
        let points: Vec<Vec<f64>> = recommendations
            .iter()
            .map(|rec| {
                self.objectives
                    .iter()
                    .map(|obj| obj.oriented(rec.objective_scores.get(&obj.name).copied().unwrap_or(0.0)))
                    .collect()
            })
            .collect();

        non_dominated_fronts(&points)
            .into_iter()
            .map(|front| {
                front
                    .into_iter()
                    .map(|i| recommendations[i].content_id.clone())
                    .collect()
            })
            .collect()
    }

    /// Learning path using the configured difficulty jump
    pub fn find_learning_path(&self, start_id: &str, end_id: &str) -> Vec<String> {
        find_learning_path(&self.graph, start_id, end_id, self.config.max_difficulty_jump)
    }

    /// Related content using the configured decay
    pub fn find_related_content(&self, content_id: &str, max_hops: usize, limit: usize) -> Vec<(String, f64)> {
        let traversal = TraversalConfig {
            max_hops,
            decay: self.config.decay,
            limit,
        };
        find_related_content(&self.graph, content_id, None, &traversal)
    }

    pub fn get_statistics(&self) -> GraphStatistics {
        self.graph.statistics()
    }

    /// Scale the named objective weights and renormalize all weights to sum to 1.0.
    ///
    /// Requires exclusive access; shared recommenders go through
    /// [`RecommenderHandle::adjust_weights`].
    pub fn adjust_weights(&mut self, feedback: &HashMap<String, f64>) -> RecommenderResult<()> {
        self.objectives.adjust(feedback)?;
        Ok(())
    }

    /// Copy of this recommender with adjusted weights
    pub fn with_adjusted_weights(&self, feedback: &HashMap<String, f64>) -> RecommenderResult<Self> {
        Ok(Self {
            graph: Arc::clone(&self.graph),
            objectives: self.objectives.with_adjusted(feedback)?,
            config: Arc::clone(&self.config),
        })
    }
}

/// Shared recommender with copy-on-write weight updates
#[derive(Debug)]
pub struct RecommenderHandle {
    current: RwLock<Arc<Recommender>>,
}

impl RecommenderHandle {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            current: RwLock::new(Arc::new(recommender)),
        }
    }

    /// The recommender in effect now; unaffected by later adjustments
    pub fn snapshot(&self) -> Arc<Recommender> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish a recommender with adjusted weights. On error nothing changes.
    pub fn adjust_weights(&self, feedback: &HashMap<String, f64>) -> RecommenderResult<()> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = guard.with_adjusted_weights(feedback)?;
        *guard = Arc::new(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::sample_catalog;
    use crate::recommend::RecommenderError;

    fn sample() -> Arc<KnowledgeGraph> {
        Arc::new(KnowledgeGraph::from_seed(&sample_catalog()).unwrap())
    }

    fn books() -> Vec<String> {
        vec!["book_001".into(), "book_002".into(), "book_003".into()]
    }

    #[test]
    fn test_empty_candidates() {
        let recommender = Recommender::new(sample()).unwrap();
        let empty: [&str; 0] = [];
        assert!(recommender.recommend("u1", &UserContext::new(), &empty, 10).is_empty());
    }

    #[test]
    fn test_ranked_and_truncated() {
        let recommender = Recommender::new(sample()).unwrap();
        let context = UserContext::new().with_history(["book_001"]);
        let recs = recommender.recommend("u1", &context, &books(), 2);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].rank, 1);
        assert_eq!(recs[1].rank, 2);
        assert!(recs[0].overall_score >= recs[1].overall_score);
        // Already read, novelty 0 and no relevance
        assert!(recs.iter().all(|r| r.content_id != "book_001"));

        let names: Vec<&str> = recs[0].objective_scores.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["relevance", "difficulty_match", "novelty", "engagement"]);
    }

    #[test]
    fn test_stable_ties_keep_candidate_order() {
        let recommender = Recommender::new(sample()).unwrap();
        let candidates = ["ghost_b", "ghost_a", "ghost_c"];
        let recs = recommender.recommend("u1", &UserContext::new(), &candidates, 10);

        let ids: Vec<&str> = recs.iter().map(|r| r.content_id.as_str()).collect();
        assert_eq!(ids, candidates);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = sample();
        let sequential = Recommender::with_config(
            Arc::clone(&graph),
            RecommenderConfig { parallel: false, ..Default::default() },
        )
        .unwrap();
        let parallel = Recommender::with_config(
            graph,
            RecommenderConfig { parallel: true, parallel_threshold: 1, ..Default::default() },
        )
        .unwrap();

        let context = UserContext::new()
            .with_history(["book_001", "topic_001"])
            .with_cultural_preferences(["Amis"]);
        let candidates: Vec<String> = sample().nodes().map(|n| n.id.clone()).collect();

        assert_eq!(
            sequential.recommend("u1", &context, &candidates, 20),
            parallel.recommend("u1", &context, &candidates, 20)
        );
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = Recommender::with_objectives(sample(), vec![Objective::new("relevance", -0.1, true)])
            .unwrap_err();
        assert!(matches!(err, RecommenderError::Objective(_)));
    }

    #[test]
    fn test_minimized_objective_is_inverted() {
        let recommender =
            Recommender::with_objectives(sample(), vec![Objective::new("novelty", 1.0, false)]).unwrap();
        let context = UserContext::new().with_history(["book_002"]);
        let recs = recommender.recommend("u1", &context, &["book_002"], 1);

        assert_eq!(recs[0].objective_scores["novelty"], 0.0);
        assert_eq!(recs[0].overall_score, 1.0);
    }

    #[test]
    fn test_cultural_resonance_objective() {
        let recommender = Recommender::with_objectives(
            sample(),
            vec![Objective::new("cultural_resonance", 1.0, true)],
        )
        .unwrap();
        let context = UserContext::new().with_cultural_preferences(["Paiwan"]);
        let recs = recommender.recommend("u1", &context, &books(), 3);

        assert_eq!(recs[0].content_id, "book_003");
        assert_eq!(recs[0].overall_score, 1.0);
    }

    #[test]
    fn test_adjust_weights_renormalizes() {
        let mut recommender = Recommender::new(sample()).unwrap();
        let feedback = HashMap::from([("novelty".to_string(), 3.0), ("unknown".to_string(), 9.0)]);
        recommender.adjust_weights(&feedback).unwrap();

        let total: f64 = recommender.objectives().iter().map(|o| o.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((recommender.objectives().get("novelty").unwrap().weight - 0.6 / 1.4).abs() < 1e-12);

        let bad = HashMap::from([("novelty".to_string(), -1.0)]);
        assert!(recommender.adjust_weights(&bad).is_err());
        assert!((recommender.objectives().total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_handle_snapshots_are_isolated() {
        let handle = RecommenderHandle::new(Recommender::new(sample()).unwrap());
        let before = handle.snapshot();

        handle
            .adjust_weights(&HashMap::from([("relevance".to_string(), 0.0)]))
            .unwrap();
        let after = handle.snapshot();

        assert_eq!(before.objectives().get("relevance").unwrap().weight, 0.35);
        assert_eq!(after.objectives().get("relevance").unwrap().weight, 0.0);
        assert!((after.objectives().total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pareto_fronts() {
        let recommender = Recommender::new(sample()).unwrap();
        let context = UserContext::new().with_history(["book_001"]);
        let recs = recommender.recommend("u1", &context, &books(), 3);
        let fronts = recommender.pareto_fronts(&recs);

        let total: usize = fronts.iter().map(Vec::len).sum();
        assert_eq!(total, recs.len());
        assert!(!fronts[0].is_empty());
        // book_001 is dominated: it is already read and unrelated to itself
        assert!(!fronts[0].contains(&"book_001".to_string()));
    }

    #[test]
    fn test_facade_passthroughs() {
        let recommender = Recommender::new(sample()).unwrap();
        assert_eq!(
            recommender.find_learning_path("book_001", "book_003"),
            vec!["book_001", "book_002", "book_003"]
        );
        assert_eq!(recommender.find_related_content("book_001", 1, 1).len(), 1);
        assert_eq!(recommender.get_statistics().num_nodes, 8);
    }
}
