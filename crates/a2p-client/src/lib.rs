//! Boundary implementations for the a2p memory exchange.
//!
//! Two [`a2p_core::profile::ProfileStore`] implementations: the
//! bearer-token HTTP client for a real profile service, and the
//! in-memory store that simulates the service (including the approval
//! workflow) for demos and tests. Plus the Anthropic model provider.

pub mod anthropic;
pub mod http;
pub mod memory;
mod wire;

pub use anthropic::AnthropicModelProvider;
pub use http::HttpProfileStore;
pub use memory::InMemoryProfileStore;
