//! Core type definitions for the content graph

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of a content node (e.g., "book", "culture")
///
/// Well-known kinds get their own variant; anything else is kept verbatim in
/// [`NodeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Book,
    Topic,
    Concept,
    Culture,
    Language,
    Tradition,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Book => "book",
            NodeType::Topic => "topic",
            NodeType::Concept => "concept",
            NodeType::Culture => "culture",
            NodeType::Language => "language",
            NodeType::Tradition => "tradition",
            NodeType::Other(s) => s,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "book" => NodeType::Book,
            "topic" => NodeType::Topic,
            "concept" => NodeType::Concept,
            "culture" => NodeType::Culture,
            "language" => NodeType::Language,
            "tradition" => NodeType::Tradition,
            other => NodeType::Other(other.to_string()),
        })
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(NodeType::Other(_)) | Err(_) => NodeType::Other(s),
            Ok(known) => known,
        }
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<NodeType> for String {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Relation type of a directed edge (e.g., "prerequisite", "cultural_context")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationType {
    Prerequisite,
    Related,
    Covers,
    CulturalContext,
    Other(String),
}

impl RelationType {
    pub fn as_str(&self) -> &str {
        match self {
            RelationType::Prerequisite => "prerequisite",
            RelationType::Related => "related",
            RelationType::Covers => "covers",
            RelationType::CulturalContext => "cultural_context",
            RelationType::Other(s) => s,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "prerequisite" => RelationType::Prerequisite,
            "related" => RelationType::Related,
            "covers" => RelationType::Covers,
            "cultural_context" => RelationType::CulturalContext,
            other => RelationType::Other(other.to_string()),
        })
    }
}

impl From<String> for RelationType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(RelationType::Other(_)) | Err(_) => RelationType::Other(s),
            Ok(known) => known,
        }
    }
}

impl From<&str> for RelationType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<RelationType> for String {
    fn from(t: RelationType) -> Self {
        match t {
            RelationType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
