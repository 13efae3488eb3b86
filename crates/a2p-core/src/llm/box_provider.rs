//! BoxModelProvider -- object-safe dynamic dispatch wrapper for
//! [`ModelProvider`].
//!
//! `ModelProvider` uses RPITIT and cannot be a trait object directly.
//! The usual workaround applies:
//! 1. an object-safe `ModelProviderDyn` trait with boxed futures,
//! 2. a blanket impl of `ModelProviderDyn` for all `T: ModelProvider`,
//! 3. `BoxModelProvider` wrapping `Box<dyn ModelProviderDyn>`.
//!
//! Sessions pick a provider at construction (HTTP-backed when a model
//! credential is configured, scripted otherwise) and hold it through
//! this wrapper.

use std::future::Future;
use std::pin::Pin;

use a2p_types::llm::{CompletionRequest, CompletionResponse, ModelError};

use super::provider::ModelProvider;

/// Object-safe version of [`ModelProvider`] with boxed futures.
pub trait ModelProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, ModelError>> + Send + 'a>>;
}

impl<T: ModelProvider> ModelProviderDyn for T {
    fn name(&self) -> &str {
        ModelProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, ModelError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased model provider for runtime selection.
pub struct BoxModelProvider {
    inner: Box<dyn ModelProviderDyn + Send + Sync>,
}

impl BoxModelProvider {
    /// Wrap a concrete [`ModelProvider`] in a type-erased box.
    pub fn new<T: ModelProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send a completion request and receive the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ModelError> {
        self.inner.complete_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    impl ModelProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, ModelError> {
            Ok(CompletionResponse {
                content: request.messages[0].content.clone(),
            })
        }
    }

    #[tokio::test]
    async fn boxed_provider_delegates() {
        let provider = BoxModelProvider::new(EchoProvider);
        assert_eq!(provider.name(), "echo");
        let response = provider
            .complete(&CompletionRequest::deterministic("hello"))
            .await
            .unwrap();
        assert_eq!(response.content, "hello");
    }
}
