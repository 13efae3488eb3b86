//! Scoped profile views.
//!
//! A `ProfileView` is the read model over approved state: the profile
//! service returns approved records grouped by memory kind, and the
//! reader never sees proposed or rejected records. A brand-new entity
//! yields a view with all buckets empty, which is a normal outcome.

use serde::{Deserialize, Serialize};

use crate::memory::{MemoryKind, MemoryRecord};

/// Approved memories grouped by kind, as returned by one scoped read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(default)]
    pub episodic: Vec<MemoryRecord>,
    #[serde(default)]
    pub semantic: Vec<MemoryRecord>,
    #[serde(default)]
    pub procedural: Vec<MemoryRecord>,
}

impl ProfileView {
    /// An empty view, used when the profile is missing or a read failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bucket(&self, kind: MemoryKind) -> &[MemoryRecord] {
        match kind {
            MemoryKind::Episodic => &self.episodic,
            MemoryKind::Semantic => &self.semantic,
            MemoryKind::Procedural => &self.procedural,
        }
    }

    pub fn bucket_mut(&mut self, kind: MemoryKind) -> &mut Vec<MemoryRecord> {
        match kind {
            MemoryKind::Episodic => &mut self.episodic,
            MemoryKind::Semantic => &mut self.semantic,
            MemoryKind::Procedural => &mut self.procedural,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.episodic.is_empty() && self.semantic.is_empty() && self.procedural.is_empty()
    }

    pub fn total(&self) -> usize {
        self.episodic.len() + self.semantic.len() + self.procedural.len()
    }

    /// All records across buckets in kind order, preserving each
    /// bucket's insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MemoryRecord> {
        MemoryKind::ALL
            .into_iter()
            .flat_map(|kind| self.bucket(kind).iter())
    }
}

/// Opaque identifier returned by the profile service for a submitted
/// proposal. Carries no status: approval is pending from the caller's
/// perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalHandle {
    pub proposal_id: String,
}

impl ProposalHandle {
    pub fn new(proposal_id: impl Into<String>) -> Self {
        Self {
            proposal_id: proposal_id.into(),
        }
    }
}
