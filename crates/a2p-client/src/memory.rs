//! In-memory profile store.
//!
//! Simulates the profile service for demos and tests: proposals enter
//! as `proposed`, reads return only approved records matching the
//! requested scopes, and the approval hooks stand in for the owner's
//! dashboard. Status transitions follow the one-way lifecycle; an
//! approve or reject of a non-proposed record is a no-op.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use a2p_core::profile::ProfileStore;
use a2p_types::error::{ProfileError, ProposalError};
use a2p_types::memory::{CandidateRecord, MemoryRecord, MemoryStatus};
use a2p_types::profile::{ProfileView, ProposalHandle};
use a2p_types::scope::ScopeSet;

/// Profile state held in process, keyed by record id.
#[derive(Default)]
pub struct InMemoryProfileStore {
    records: DashMap<Uuid, MemoryRecord>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approve every proposed record. The demo's auto-approval
    /// checkpoint.
    pub fn approve_all(&self) -> usize {
        self.set_all_proposed(MemoryStatus::Approved)
    }

    /// Reject every proposed record.
    pub fn reject_all(&self) -> usize {
        self.set_all_proposed(MemoryStatus::Rejected)
    }

    /// Approve one record by proposal id. Returns false if the record
    /// is unknown or no longer proposed.
    pub fn approve(&self, proposal_id: &str) -> bool {
        self.set_status(proposal_id, MemoryStatus::Approved)
    }

    /// Reject one record by proposal id.
    pub fn reject(&self, proposal_id: &str) -> bool {
        self.set_status(proposal_id, MemoryStatus::Rejected)
    }

    /// All records pending approval, in no particular order.
    pub fn pending(&self) -> Vec<MemoryRecord> {
        self.records
            .iter()
            .filter(|r| r.status == MemoryStatus::Proposed)
            .map(|r| r.value().clone())
            .collect()
    }

    /// Every record regardless of status, for the final summary view.
    pub fn all_records(&self) -> Vec<MemoryRecord> {
        let mut records: Vec<MemoryRecord> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    fn set_all_proposed(&self, to: MemoryStatus) -> usize {
        let mut changed = 0;
        for mut entry in self.records.iter_mut() {
            if entry.status.can_transition_to(to) {
                entry.status = to;
                changed += 1;
            }
        }
        changed
    }

    fn set_status(&self, proposal_id: &str, to: MemoryStatus) -> bool {
        let Ok(id) = proposal_id.parse::<Uuid>() else {
            return false;
        };
        match self.records.get_mut(&id) {
            Some(mut entry) if entry.status.can_transition_to(to) => {
                entry.status = to;
                true
            }
            _ => false,
        }
    }
}

impl ProfileStore for InMemoryProfileStore {
    async fn read_profile(&self, scopes: &ScopeSet) -> Result<ProfileView, ProfileError> {
        let mut approved: Vec<MemoryRecord> = self
            .records
            .iter()
            .filter(|r| r.status == MemoryStatus::Approved && scopes.covers(&r.category))
            .map(|r| r.value().clone())
            .collect();
        approved.sort_by_key(|r| r.created_at);

        let mut view = ProfileView::empty();
        for record in approved {
            view.bucket_mut(record.kind).push(record);
        }
        Ok(view)
    }

    async fn propose(
        &self,
        origin: &str,
        candidate: &CandidateRecord,
    ) -> Result<ProposalHandle, ProposalError> {
        let id = Uuid::new_v4();
        let record = MemoryRecord {
            id,
            content: candidate.content.clone(),
            category: candidate.category.clone(),
            kind: candidate.kind,
            confidence: candidate.confidence,
            status: MemoryStatus::Proposed,
            origin: origin.to_string(),
            context_note: Some(candidate.context_note.clone()),
            created_at: Utc::now(),
        };
        self.records.insert(id, record);
        Ok(ProposalHandle::new(id.to_string()))
    }
}
