use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while building or adjusting an objective set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjectiveError {
    #[error("Objective '{name}' has invalid weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { name: String, weight: f64 },

    #[error("Objective '{0}' is defined more than once")]
    DuplicateObjective(String),

    #[error("Objective set must contain at least one objective")]
    Empty,

    #[error("Feedback for objective '{name}' has invalid multiplier {factor}")]
    InvalidMultiplier { name: String, factor: f64 },

    #[error("Adjusted objective weights sum to {0}; cannot renormalize")]
    DegenerateWeights(f64),
}

pub type ObjectiveResult<T> = Result<T, ObjectiveError>;

fn default_maximize() -> bool {
    true
}

/// A single scoring dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    pub weight: f64,
    #[serde(default = "default_maximize")]
    pub maximize: bool,
}

impl Objective {
    pub fn new(name: impl Into<String>, weight: f64, maximize: bool) -> Self {
        Self {
            name: name.into(),
            weight,
            maximize,
        }
    }

    /// Score seen by the aggregator: inverted when the objective is minimized.
    pub fn oriented(&self, score: f64) -> f64 {
        if self.maximize {
            score
        } else {
            1.0 - score
        }
    }
}

/// A validated, ordered set of objectives.
///
/// Weights are relative; aggregation divides by their sum, so they need not
/// add up to one until [`ObjectiveSet::adjust`] renormalizes them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObjectiveSet {
    objectives: Vec<Objective>,
}

impl ObjectiveSet {
    /// Validate and build an objective set.
    pub fn new(objectives: Vec<Objective>) -> ObjectiveResult<Self> {
        if objectives.is_empty() {
            return Err(ObjectiveError::Empty);
        }

        let mut seen = HashSet::new();
        for obj in &objectives {
            if !obj.weight.is_finite() || obj.weight < 0.0 {
                return Err(ObjectiveError::InvalidWeight {
                    name: obj.name.clone(),
                    weight: obj.weight,
                });
            }
            if !seen.insert(obj.name.as_str()) {
                return Err(ObjectiveError::DuplicateObjective(obj.name.clone()));
            }
        }

        Ok(Self { objectives })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Objective> {
        self.objectives.iter()
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.objectives.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn weights(&self) -> Array1<f64> {
        self.objectives.iter().map(|o| o.weight).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights().sum()
    }

    /// Weighted mean of `scores`, aligned with the objective order.
    ///
    /// Missing trailing scores count as 0.0. A zero total weight yields 0.0.
    pub fn aggregate(&self, scores: &[f64]) -> f64 {
        let weights = self.weights();
        let total = weights.sum();
        if total <= 0.0 {
            return 0.0;
        }

        let oriented: Array1<f64> = self
            .objectives
            .iter()
            .enumerate()
            .map(|(i, obj)| obj.oriented(scores.get(i).copied().unwrap_or(0.0)))
            .collect();

        oriented.dot(&weights) / total
    }

    /// Multiply the weights named in `feedback` and renormalize all weights to sum to 1.0.
    ///
    /// Names not in the set are ignored. On error the set is left untouched.
    pub fn adjust(&mut self, feedback: &HashMap<String, f64>) -> ObjectiveResult<()> {
        let mut adjusted = self.objectives.clone();

        for obj in adjusted.iter_mut() {
            if let Some(&factor) = feedback.get(&obj.name) {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(ObjectiveError::InvalidMultiplier {
                        name: obj.name.clone(),
                        factor,
                    });
                }
                obj.weight *= factor;
            }
        }

        let total: f64 = adjusted.iter().map(|o| o.weight).sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(ObjectiveError::DegenerateWeights(total));
        }

        for obj in adjusted.iter_mut() {
            obj.weight /= total;
        }

        self.objectives = adjusted;
        tracing::info!(
            "Adjusted objective weights: {:?}",
            self.objectives
                .iter()
                .map(|o| (o.name.as_str(), o.weight))
                .collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Copy-on-write variant of [`ObjectiveSet::adjust`].
    pub fn with_adjusted(&self, feedback: &HashMap<String, f64>) -> ObjectiveResult<Self> {
        let mut next = self.clone();
        next.adjust(feedback)?;
        Ok(next)
    }
}

impl<'de> Deserialize<'de> for ObjectiveSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let objectives = Vec::<Objective>::deserialize(deserializer)?;
        ObjectiveSet::new(objectives).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a ObjectiveSet {
    type Item = &'a Objective;
    type IntoIter = std::slice::Iter<'a, Objective>;

    fn into_iter(self) -> Self::IntoIter {
        self.objectives.iter()
    }
}

/// Population variance of a score vector; 0.0 for fewer than two values.
pub fn variance(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    Array1::from(scores.to_vec()).var(0.0)
}
