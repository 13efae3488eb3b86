//! Core logic of the a2p memory exchange protocol.
//!
//! This crate holds everything with real invariants: the extraction
//! strategies that turn conversation into typed memory candidates, the
//! scoped profile reader and its degrade-to-empty rule, the proposal
//! client with per-record failure accounting, the deterministic context
//! composer, and the agent-session state machine that ties them
//! together.
//!
//! Boundary implementations (the HTTP profile client, the in-memory
//! store, concrete model providers) live in `a2p-client` and the demo
//! binary; this crate only defines the trait seams.

pub mod compose;
pub mod extract;
pub mod llm;
pub mod profile;
pub mod session;
