//! Open-ended property values for content nodes and relations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known property keys
pub mod keys {
    /// Reading difficulty in [0, 1]
    pub const DIFFICULTY: &str = "difficulty";
    /// Historical engagement in [0, 1]
    pub const AVG_ENGAGEMENT: &str = "avg_engagement";
    /// Display name (cultures, languages, traditions, topics)
    pub const NAME: &str = "name";
    /// Content language
    pub const LANGUAGE: &str = "language";
    /// Book title
    pub const TITLE: &str = "title";
}

/// A catalog property value.
///
/// Serialized untagged, so catalog files use plain JSON scalars and lists.
/// Integers stay distinct from floats but both read back through [`PropertyValue::as_f64`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        PropertyValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Extra properties in insertion order
pub type PropertyMap = IndexMap<String, PropertyValue>;
