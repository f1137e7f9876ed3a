//! Caller-supplied user context

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the caller knows about the user at request time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// Previously consumed content ids, oldest first
    #[serde(default)]
    pub history: Vec<String>,

    /// Preferred culture names
    #[serde(default)]
    pub cultural_preferences: BTreeSet<String>,

    /// Reading proficiency in [0, 1], when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<f64>,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history<I, S>(mut self, history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = history.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cultural_preferences<I, S>(mut self, cultures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cultural_preferences = cultures.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_proficiency(mut self, proficiency: f64) -> Self {
        self.proficiency = Some(proficiency);
        self
    }

    /// The last `n` history items, oldest first
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Proficiency clamped to [0, 1], or `default` when unknown or not a number
    pub fn proficiency_or(&self, default: f64) -> f64 {
        match self.proficiency {
            Some(level) if level.is_finite() => level.clamp(0.0, 1.0),
            _ => default,
        }
    }
}
