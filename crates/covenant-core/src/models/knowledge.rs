use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Metadata;
use crate::constants::{META_CATEGORY, META_TOPIC, META_TYPE};

/// Category of a legal knowledge entry, stored under the `category` metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeCategory {
    /// Binding force and validity of contracts.
    Validity,
    /// Required contract elements.
    Structure,
    /// Advisory risk hints.
    Risk,
    /// Dispute resolution clauses.
    Dispute,
}

impl KnowledgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validity => "validity",
            Self::Structure => "structure",
            Self::Risk => "risk",
            Self::Dispute => "dispute",
        }
    }
}

impl fmt::Display for KnowledgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnowledgeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "validity" => Ok(Self::Validity),
            "structure" => Ok(Self::Structure),
            "risk" => Ok(Self::Risk),
            "dispute" => Ok(Self::Dispute),
            other => Err(format!("unknown knowledge category '{other}'")),
        }
    }
}

/// A legal knowledge entry before it is chunked and embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub content: String,
    /// Entry kind, e.g. "statute", "checklist", "advisory".
    pub kind: String,
    pub category: KnowledgeCategory,
    pub topic: String,
}

impl KnowledgeEntry {
    pub fn new(
        content: impl Into<String>,
        kind: impl Into<String>,
        category: KnowledgeCategory,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            kind: kind.into(),
            category,
            topic: topic.into(),
        }
    }

    /// Metadata stored alongside every chunk of this entry.
    pub fn metadata(&self) -> Metadata {
        let mut meta = Metadata::new();
        meta.insert(META_TYPE.to_string(), self.kind.clone());
        meta.insert(META_CATEGORY.to_string(), self.category.as_str().to_string());
        meta.insert(META_TOPIC.to_string(), self.topic.clone());
        meta
    }
}

/// One nearest-neighbour hit. `score` is the raw inner product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub metadata: Metadata,
    pub score: f32,
}

impl SearchResult {
    /// The parsed `category` metadata, if present and known.
    pub fn category(&self) -> Option<KnowledgeCategory> {
        self.metadata.get(META_CATEGORY)?.parse().ok()
    }

    pub fn topic(&self) -> Option<&str> {
        self.metadata.get(META_TOPIC).map(String::as_str)
    }
}

/// Advisory risk hint retrieved from the knowledge store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskGuidance {
    pub guidance: String,
    pub category: KnowledgeCategory,
    pub topic: String,
    pub relevance: f32,
}
