//! ModelProvider trait definition.
//!
//! The model boundary of the protocol: a system instruction plus
//! ordered messages in, one text completion out. Uses native async fn
//! in traits (RPITIT, Rust 2024 edition); runtime provider selection
//! goes through [`super::BoxModelProvider`].

use a2p_types::llm::{CompletionRequest, CompletionResponse, ModelError};

/// Trait for model backends.
///
/// Implementations include the HTTP provider in `a2p-client` and the
/// scripted responder in the demo binary. Every failure is recoverable
/// at the call site, so implementations should map transport problems
/// to [`ModelError`] rather than panic.
pub trait ModelProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic", "scripted").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, ModelError>> + Send;
}
