//! Observability for the a2p memory exchange.

pub mod tracing_setup;
