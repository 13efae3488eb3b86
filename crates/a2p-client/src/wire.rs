//! Wire shapes for the profile service HTTP API.
//!
//! These mirror the service's JSON, not the domain types. Conversions
//! stay in this module so the rest of the crate works with
//! `a2p-types` only.

use serde::{Deserialize, Serialize};

use a2p_types::memory::{CandidateRecord, MemoryRecord};
use a2p_types::profile::ProfileView;

/// Response body of `GET /v1/profile`.
///
/// Buckets the service leaves out deserialize as empty, matching
/// [`ProfileView`]'s own defaults.
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub episodic: Vec<MemoryRecord>,
    #[serde(default)]
    pub semantic: Vec<MemoryRecord>,
    #[serde(default)]
    pub procedural: Vec<MemoryRecord>,
}

impl From<ProfileResponse> for ProfileView {
    fn from(response: ProfileResponse) -> Self {
        ProfileView {
            episodic: response.episodic,
            semantic: response.semantic,
            procedural: response.procedural,
        }
    }
}

/// Request body of `POST /v1/memories/proposals`.
#[derive(Debug, Serialize)]
pub struct ProposalRequest<'a> {
    pub content: &'a str,
    pub category: &'a str,
    pub memory_kind: &'a str,
    pub confidence: f64,
    pub origin: &'a str,
    pub context: &'a str,
}

impl<'a> ProposalRequest<'a> {
    pub fn new(origin: &'a str, candidate: &'a CandidateRecord, kind: &'a str) -> Self {
        Self {
            content: &candidate.content,
            category: &candidate.category,
            memory_kind: kind,
            confidence: candidate.confidence,
            origin,
            context: &candidate.context_note,
        }
    }
}

/// Response body of `POST /v1/memories/proposals`.
#[derive(Debug, Deserialize)]
pub struct ProposalResponse {
    pub proposal_id: String,
}
