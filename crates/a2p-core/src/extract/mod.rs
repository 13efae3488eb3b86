//! Extraction strategies.
//!
//! One extraction pass turns a conversation log into a
//! [`CandidateBatch`]. Two strategies implement the [`Extractor`] seam:
//!
//! - [`model::ModelExtractor`] asks a model for a JSON array of
//!   candidates constrained to the domain taxonomy, and falls back to
//!   the rule extractor on any failure;
//! - [`rules::RuleExtractor`] scans user turns for fixed domain
//!   keywords, deterministically.
//!
//! The strategy is selected once at session construction (model-backed
//! when a provider is configured, rule-based otherwise), not checked at
//! call sites.
//!
//! Confidence is strategy-determined and set exactly once: rule hits
//! are rule-certain (0.95), model inferences are advisory (0.85), and
//! the catch-all is low-information (0.30). Nothing downstream ever
//! recomputes it.

use std::future::Future;
use std::pin::Pin;

use a2p_types::conversation::ConversationLog;
use a2p_types::memory::CandidateBatch;

pub mod model;
pub mod parse;
pub mod rules;

/// Confidence assigned to model-inferred candidates.
pub const MODEL_CONFIDENCE: f64 = 0.85;

/// Confidence assigned to keyword-rule candidates.
pub const RULE_CONFIDENCE: f64 = 0.95;

/// Confidence assigned to the low-information catch-all candidate.
pub const CATCH_ALL_CONFIDENCE: f64 = 0.30;

/// Strategy seam for turning a conversation into memory candidates.
///
/// Pure over its inputs: no strategy submits anything, and calling
/// `extract` twice on the same log yields the same batch (modulo model
/// nondeterminism upstream of the fallback).
pub trait Extractor: Send + Sync {
    /// Strategy name for logging ("model" or "rules").
    fn name(&self) -> &str;

    /// Produce candidates from the turns recorded so far.
    fn extract(
        &self,
        log: &ConversationLog,
    ) -> impl Future<Output = CandidateBatch> + Send;
}

/// Object-safe version of [`Extractor`] with boxed futures.
pub trait ExtractorDyn: Send + Sync {
    fn name(&self) -> &str;

    fn extract_boxed<'a>(
        &'a self,
        log: &'a ConversationLog,
    ) -> Pin<Box<dyn Future<Output = CandidateBatch> + Send + 'a>>;
}

impl<T: Extractor> ExtractorDyn for T {
    fn name(&self) -> &str {
        Extractor::name(self)
    }

    fn extract_boxed<'a>(
        &'a self,
        log: &'a ConversationLog,
    ) -> Pin<Box<dyn Future<Output = CandidateBatch> + Send + 'a>> {
        Box::pin(self.extract(log))
    }
}

/// Type-erased extractor, so a session can hold either strategy.
pub struct BoxExtractor {
    inner: Box<dyn ExtractorDyn + Send + Sync>,
}

impl BoxExtractor {
    pub fn new<T: Extractor + 'static>(extractor: T) -> Self {
        Self {
            inner: Box::new(extractor),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn extract(&self, log: &ConversationLog) -> CandidateBatch {
        self.inner.extract_boxed(log).await
    }
}
