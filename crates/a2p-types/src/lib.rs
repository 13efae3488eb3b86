//! Shared domain types for the a2p memory exchange protocol.
//!
//! This crate contains the data model used across the workspace: memory
//! records and their lifecycle, category scopes and taxonomies,
//! conversation logs, profile views, model-call shapes, and the
//! environment-driven configuration surface.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono,
//! thiserror, secrecy.

pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod memory;
pub mod profile;
pub mod scope;
