//! Profile service seam: scoped reads and memory proposals.
//!
//! [`ProfileStore`] is the trait boundary to the external profile
//! service (RPITIT; implementations live in `a2p-client`). Two wrappers
//! encode the protocol's recovery rules:
//!
//! - [`ProfileReader`] converts any read failure into an empty view. A
//!   missing profile degrades grounding quality but must never block a
//!   conversation.
//! - [`ProposalClient`] submits candidate batches record by record,
//!   collecting per-record failures instead of aborting. A record is
//!   either accepted (handle returned) or reported failed -- never
//!   silently dropped.

use a2p_types::error::{ProfileError, ProposalError};
use a2p_types::memory::{CandidateBatch, CandidateRecord};
use a2p_types::profile::{ProfileView, ProposalHandle};
use a2p_types::scope::ScopeSet;

/// Boundary trait to the external profile service.
///
/// The service owns persistence, scope enforcement, and the approval
/// workflow; this trait only carries the request/response contract.
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ProfileStore: Send + Sync {
    /// Read the approved slice of the profile visible under `scopes`,
    /// grouped by memory kind. An empty view is a valid response.
    fn read_profile(
        &self,
        scopes: &ScopeSet,
    ) -> impl std::future::Future<Output = Result<ProfileView, ProfileError>> + Send;

    /// Submit one candidate for approval. Returns an opaque handle; the
    /// record stays invisible to readers until the owner approves it.
    fn propose(
        &self,
        origin: &str,
        candidate: &CandidateRecord,
    ) -> impl std::future::Future<Output = Result<ProposalHandle, ProposalError>> + Send;
}

/// Read model over approved profile state, with the degrade-to-empty
/// rule applied.
pub struct ProfileReader<'a, S> {
    store: &'a S,
}

impl<'a, S: ProfileStore> ProfileReader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read the scoped profile view, treating any service failure as an
    /// empty profile. The error goes to the log, not to the caller.
    #[tracing::instrument(name = "read_profile", skip(self), fields(scope_count = scopes.patterns().len()))]
    pub async fn read(&self, scopes: &ScopeSet) -> ProfileView {
        match self.store.read_profile(scopes).await {
            Ok(view) => {
                tracing::debug!(total = view.total(), "profile view loaded");
                view
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile read failed; proceeding with empty context");
                ProfileView::empty()
            }
        }
    }
}

/// A record that could not be submitted, with the typed cause.
/// `index` is the record's position in the submitted batch, so callers
/// can pair failures back to candidates even when contents collide.
#[derive(Debug)]
pub struct ProposalFailure {
    pub index: usize,
    pub content: String,
    pub category: String,
    pub error: ProposalError,
}

/// Outcome of submitting one candidate batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub accepted: Vec<ProposalHandle>,
    pub failures: Vec<ProposalFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.accepted.len() + self.failures.len()
    }

    /// The "N of M memories proposed" line surfaced to the operator.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} memories proposed",
            self.accepted.len(),
            self.attempted()
        )
    }
}

/// Submits candidate batches on behalf of one agent identity.
pub struct ProposalClient<'a, S> {
    store: &'a S,
    origin: String,
}

impl<'a, S: ProfileStore> ProposalClient<'a, S> {
    pub fn new(store: &'a S, origin: impl Into<String>) -> Self {
        Self {
            store,
            origin: origin.into(),
        }
    }

    /// Submit every candidate in the batch, continuing past individual
    /// failures. Log-and-continue, never all-or-nothing.
    #[tracing::instrument(
        name = "propose_batch",
        skip(self, batch),
        fields(origin = %self.origin, candidates = batch.len(), source = %batch.source)
    )]
    pub async fn propose_batch(&self, batch: &CandidateBatch) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, candidate) in batch.candidates.iter().enumerate() {
            match self.store.propose(&self.origin, candidate).await {
                Ok(handle) => {
                    tracing::debug!(
                        proposal_id = %handle.proposal_id,
                        category = %candidate.category,
                        "memory proposed"
                    );
                    report.accepted.push(handle);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        category = %candidate.category,
                        "failed to propose memory; continuing with remaining records"
                    );
                    report.failures.push(ProposalFailure {
                        index,
                        content: candidate.content.clone(),
                        category: candidate.category.clone(),
                        error: e,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2p_types::memory::{ExtractionSource, MemoryKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store double that fails submission for one marked record.
    struct FlakyStore {
        fail_on_category: &'static str,
        calls: AtomicUsize,
    }

    impl ProfileStore for FlakyStore {
        async fn read_profile(&self, _scopes: &ScopeSet) -> Result<ProfileView, ProfileError> {
            Err(ProfileError::Transport("connection refused".to_string()))
        }

        async fn propose(
            &self,
            _origin: &str,
            candidate: &CandidateRecord,
        ) -> Result<ProposalHandle, ProposalError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if candidate.category == self.fail_on_category {
                Err(ProposalError::Transport("broken pipe".to_string()))
            } else {
                Ok(ProposalHandle::new(format!("prop-{n}")))
            }
        }
    }

    fn candidate(category: &str) -> CandidateRecord {
        CandidateRecord {
            content: format!("something about {category}"),
            category: category.to_string(),
            kind: MemoryKind::Semantic,
            confidence: 0.85,
            context_note: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn failed_read_degrades_to_empty_view() {
        let store = FlakyStore {
            fail_on_category: "",
            calls: AtomicUsize::new(0),
        };
        let reader = ProfileReader::new(&store);
        let view = reader.read(&ScopeSet::new(["a2p:travel.*"])).await;
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let store = FlakyStore {
            fail_on_category: "a2p:food.budget",
            calls: AtomicUsize::new(0),
        };
        let batch = CandidateBatch::new(
            vec![
                candidate("a2p:food.cuisines"),
                candidate("a2p:food.budget"),
                candidate("a2p:food.dishes"),
            ],
            ExtractionSource::Rules,
        );

        let client = ProposalClient::new(&store, "food");
        let report = client.propose_batch(&batch).await;

        // Exactly N-1 accepted, the failure reported for the right record.
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].category, "a2p:food.budget");
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.summary(), "2 of 3 memories proposed");
        // All three submissions were attempted.
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failure_index_distinguishes_identical_contents() {
        let store = FlakyStore {
            fail_on_category: "a2p:food.dishes",
            calls: AtomicUsize::new(0),
        };
        let mut first = candidate("a2p:food.cuisines");
        let mut second = candidate("a2p:food.dishes");
        first.content = "loves pasta".to_string();
        second.content = "loves pasta".to_string();
        let batch = CandidateBatch::new(vec![first, second], ExtractionSource::Rules);

        let report = ProposalClient::new(&store, "food").propose_batch(&batch).await;

        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.failures.len(), 1);
        // Only the second record failed, even though contents collide.
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].content, "loves pasta");
    }

    #[tokio::test]
    async fn empty_batch_reports_zero_of_zero() {
        let store = FlakyStore {
            fail_on_category: "",
            calls: AtomicUsize::new(0),
        };
        let batch = CandidateBatch::new(Vec::new(), ExtractionSource::Model);
        let report = ProposalClient::new(&store, "travel").propose_batch(&batch).await;
        assert_eq!(report.summary(), "0 of 0 memories proposed");
    }
}
