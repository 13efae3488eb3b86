//! Memory record types for the a2p exchange.
//!
//! A `MemoryRecord` is the unit of cross-agent knowledge: a statement
//! about the profile owner, tagged with a namespaced category, classified
//! by kind, and gated by an approval lifecycle. Agents never write
//! approved records directly -- they propose candidates, and the profile
//! owner approves or rejects them out of band.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Classification of a memory record.
///
/// Determines which bucket of a [`crate::profile::ProfileView`] the
/// record lives in at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// A specific past experience or event.
    Episodic,
    /// A durable fact or preference.
    Semantic,
    /// A habitual behavior or pattern.
    Procedural,
}

impl MemoryKind {
    /// All kinds in bucket order (the order profile views render them).
    pub const ALL: [MemoryKind; 3] = [
        MemoryKind::Episodic,
        MemoryKind::Semantic,
        MemoryKind::Procedural,
    ];
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryKind::Episodic => write!(f, "episodic"),
            MemoryKind::Semantic => write!(f, "semantic"),
            MemoryKind::Procedural => write!(f, "procedural"),
        }
    }
}

impl FromStr for MemoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "episodic" => Ok(MemoryKind::Episodic),
            "semantic" => Ok(MemoryKind::Semantic),
            "procedural" => Ok(MemoryKind::Procedural),
            other => Err(format!("invalid memory kind: '{other}'")),
        }
    }
}

/// Lifecycle state of a memory record.
///
/// Transitions are one-way: `proposed -> approved` or
/// `proposed -> rejected`. A record is immutable once it leaves
/// `proposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryStatus {
    Proposed,
    Approved,
    Rejected,
}

impl MemoryStatus {
    /// Whether a transition from `self` to `to` is allowed.
    pub fn can_transition_to(self, to: MemoryStatus) -> bool {
        matches!(
            (self, to),
            (MemoryStatus::Proposed, MemoryStatus::Approved)
                | (MemoryStatus::Proposed, MemoryStatus::Rejected)
        )
    }
}

impl fmt::Display for MemoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryStatus::Proposed => write!(f, "proposed"),
            MemoryStatus::Approved => write!(f, "approved"),
            MemoryStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for MemoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proposed" => Ok(MemoryStatus::Proposed),
            "approved" => Ok(MemoryStatus::Approved),
            "rejected" => Ok(MemoryStatus::Rejected),
            other => Err(format!("invalid memory status: '{other}'")),
        }
    }
}

/// A single memory record in a profile.
///
/// `confidence` expresses extraction certainty, not truth. It is set
/// once at proposal time and never recomputed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: Uuid,
    /// Human-readable statement of a fact, preference, or experience.
    pub content: String,
    /// Namespaced category tag (e.g., "a2p:travel.seats").
    pub category: String,
    pub kind: MemoryKind,
    /// Extraction certainty in [0, 1].
    pub confidence: f64,
    pub status: MemoryStatus,
    /// Identifier of the proposing agent domain (e.g., "travel").
    pub origin: String,
    /// Free-text provenance (e.g., "Learned during travel planning conversation").
    pub context_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A memory candidate produced by one extraction pass.
///
/// Candidates are drafts: they carry no id or status, and nothing is
/// persisted until a proposal client submits them. A submitted
/// candidate always enters the profile as `proposed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub content: String,
    pub category: String,
    pub kind: MemoryKind,
    pub confidence: f64,
    pub context_note: String,
}

/// Which strategy produced a candidate batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// Candidates parsed from a model completion.
    Model,
    /// Candidates from the deterministic keyword-rule fallback.
    Rules,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionSource::Model => write!(f, "model"),
            ExtractionSource::Rules => write!(f, "rules"),
        }
    }
}

/// Ordered output of one extraction pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateBatch {
    pub candidates: Vec<CandidateRecord>,
    pub source: ExtractionSource,
}

impl CandidateBatch {
    pub fn new(candidates: Vec<CandidateRecord>, source: ExtractionSource) -> Self {
        Self { candidates, source }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

/// The fixed category set an agent domain may emit.
///
/// Extraction never invents categories outside the taxonomy: model
/// output with an unknown category is dropped, and rule tables are
/// checked against the taxonomy at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<String>,
}

impl Taxonomy {
    pub fn new(categories: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Comma-separated category list for prompt interpolation.
    pub fn prompt_list(&self) -> String {
        self.categories
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_kind_roundtrip() {
        for kind in MemoryKind::ALL {
            let s = kind.to_string();
            let parsed: MemoryKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn memory_kind_serde() {
        let json = serde_json::to_string(&MemoryKind::Procedural).unwrap();
        assert_eq!(json, "\"procedural\"");
        let parsed: MemoryKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MemoryKind::Procedural);
    }

    #[test]
    fn memory_status_roundtrip() {
        for status in [
            MemoryStatus::Proposed,
            MemoryStatus::Approved,
            MemoryStatus::Rejected,
        ] {
            let s = status.to_string();
            let parsed: MemoryStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn status_transitions_are_one_way() {
        assert!(MemoryStatus::Proposed.can_transition_to(MemoryStatus::Approved));
        assert!(MemoryStatus::Proposed.can_transition_to(MemoryStatus::Rejected));
        assert!(!MemoryStatus::Approved.can_transition_to(MemoryStatus::Rejected));
        assert!(!MemoryStatus::Approved.can_transition_to(MemoryStatus::Proposed));
        assert!(!MemoryStatus::Rejected.can_transition_to(MemoryStatus::Approved));
    }

    #[test]
    fn memory_record_serialize() {
        let record = MemoryRecord {
            id: Uuid::new_v4(),
            content: "Prefers window seats on flights".to_string(),
            category: "a2p:travel.seats".to_string(),
            kind: MemoryKind::Semantic,
            confidence: 0.85,
            status: MemoryStatus::Proposed,
            origin: "travel".to_string(),
            context_note: Some("Learned during travel planning conversation".to_string()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"semantic\""));
        assert!(json.contains("\"status\":\"proposed\""));
        assert!(json.contains("a2p:travel.seats"));
    }

    #[test]
    fn taxonomy_membership() {
        let taxonomy = Taxonomy::new(["a2p:food.cuisines", "a2p:food.budget"]);
        assert!(taxonomy.contains("a2p:food.budget"));
        assert!(!taxonomy.contains("a2p:food.allergies"));
    }

    #[test]
    fn taxonomy_prompt_list_quotes_categories() {
        let taxonomy = Taxonomy::new(["a2p:travel.seats", "a2p:travel.hotels"]);
        assert_eq!(
            taxonomy.prompt_list(),
            "\"a2p:travel.seats\", \"a2p:travel.hotels\""
        );
    }
}
