//! Directed, typed, weighted relation between two content nodes

use super::property::{PropertyMap, PropertyValue};
use super::types::RelationType;
use serde::{Deserialize, Serialize};

fn default_weight() -> f64 {
    1.0
}

/// A directed edge in the content graph
///
/// `weight` is a strength multiplier, not a distance: higher means a
/// stronger connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRelation {
    /// Source node (edge goes FROM this node)
    pub source: String,

    /// Target node (edge goes TO this node)
    pub target: String,

    pub relation_type: RelationType,

    #[serde(default = "default_weight")]
    pub weight: f64,

    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub properties: PropertyMap,
}

impl ContentRelation {
    /// Create a new relation with weight 1.0
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: impl Into<RelationType>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation_type: relation_type.into(),
            weight: default_weight(),
            properties: PropertyMap::new(),
        }
    }

    /// Create a new relation with an explicit weight
    pub fn weighted(
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: impl Into<RelationType>,
        weight: f64,
    ) -> Self {
        Self {
            weight,
            ..Self::new(source, target, relation_type)
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Whether the weight is a finite, non-negative number
    pub fn has_valid_weight(&self) -> bool {
        self.weight.is_finite() && self.weight >= 0.0
    }
}

/// Relation attributes as seen by traversal code
///
/// Absent relations read as an untyped edge of weight 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData<'a> {
    pub relation_type: Option<&'a RelationType>,
    pub weight: f64,
    pub properties: Option<&'a PropertyMap>,
}

impl Default for EdgeData<'_> {
    fn default() -> Self {
        Self {
            relation_type: None,
            weight: default_weight(),
            properties: None,
        }
    }
}

impl<'a> From<&'a ContentRelation> for EdgeData<'a> {
    fn from(relation: &'a ContentRelation) -> Self {
        Self {
            relation_type: Some(&relation.relation_type),
            weight: relation.weight,
            properties: Some(&relation.properties),
        }
    }
}

impl EdgeData<'_> {
    /// Relation type name, empty for an absent relation
    pub fn type_name(&self) -> &str {
        self.relation_type.map(RelationType::as_str).unwrap_or("")
    }
}
