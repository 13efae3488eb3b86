//! Model provider seam.

pub mod box_provider;
pub mod provider;

pub use box_provider::BoxModelProvider;
pub use provider::ModelProvider;
