//! Content node of the knowledge graph
//!
//! A node is a book, topic, concept or cultural entity. Its well-known
//! attributes are typed fields; everything else lives in an open extension map.

use super::property::{keys, PropertyMap, PropertyValue};
use super::types::NodeType;
use serde::{Deserialize, Serialize};

/// Difficulty assumed for nodes that carry none
pub const DEFAULT_DIFFICULTY: f64 = 0.5;

/// Engagement assumed for nodes that carry none
pub const DEFAULT_ENGAGEMENT: f64 = 0.5;

/// Node attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeProperties {
    /// Reading difficulty in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,

    /// Average historical engagement in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_engagement: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Any other attribute
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl NodeProperties {
    /// Set a property, routing well-known keys to their typed field.
    ///
    /// A well-known key given a value of the wrong type is kept in `extra`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        let value = value.into();

        match (key.as_str(), value.as_f64(), value.as_str()) {
            (keys::DIFFICULTY, Some(f), _) => self.difficulty = Some(f),
            (keys::AVG_ENGAGEMENT, Some(f), _) => self.avg_engagement = Some(f),
            (keys::NAME, _, Some(s)) => self.name = Some(s.to_string()),
            (keys::LANGUAGE, _, Some(s)) => self.language = Some(s.to_string()),
            (keys::TITLE, _, Some(s)) => self.title = Some(s.to_string()),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// Get any property by key as a dynamic value
    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        match key {
            keys::DIFFICULTY => self.difficulty.map(PropertyValue::Float),
            keys::AVG_ENGAGEMENT => self.avg_engagement.map(PropertyValue::Float),
            keys::NAME => self.name.clone().map(PropertyValue::String),
            keys::LANGUAGE => self.language.clone().map(PropertyValue::String),
            keys::TITLE => self.title.clone().map(PropertyValue::String),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// A vertex in the content graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Unique identifier
    pub id: String,

    #[serde(rename = "type")]
    pub node_type: NodeType,

    #[serde(default)]
    pub properties: NodeProperties,
}

impl ContentNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<NodeType>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            properties: NodeProperties::default(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.properties.difficulty = Some(difficulty);
        self
    }

    pub fn with_engagement(mut self, avg_engagement: f64) -> Self {
        self.properties.avg_engagement = Some(avg_engagement);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = Some(name.into());
        self
    }

    /// Difficulty, or [`DEFAULT_DIFFICULTY`]
    pub fn difficulty(&self) -> f64 {
        self.difficulty_or(DEFAULT_DIFFICULTY)
    }

    /// Engagement, or [`DEFAULT_ENGAGEMENT`]
    pub fn engagement(&self) -> f64 {
        self.engagement_or(DEFAULT_ENGAGEMENT)
    }

    /// Difficulty, or `default` when the node carries none
    pub fn difficulty_or(&self, default: f64) -> f64 {
        self.properties.difficulty.unwrap_or(default)
    }

    /// Engagement, or `default` when the node carries none
    pub fn engagement_or(&self, default: f64) -> f64 {
        self.properties.avg_engagement.unwrap_or(default)
    }

    /// Human-readable label: name, then title, then id
    pub fn display_name(&self) -> &str {
        self.properties
            .name
            .as_deref()
            .or(self.properties.title.as_deref())
            .unwrap_or(&self.id)
    }
}
