//! Error taxonomy for the memory exchange.
//!
//! One enum per failure domain, matching the recovery rules: profile
//! read errors degrade to an empty view, extraction parse errors
//! trigger the rule fallback, proposal errors are collected per record,
//! and only a missing connection credential is fatal.

use thiserror::Error;

/// Errors from profile service reads.
///
/// Callers recover by treating the profile as empty; these never reach
/// the conversational flow.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("profile service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("profile read timed out")]
    Timeout,

    #[error("malformed profile response: {0}")]
    Malformed(String),
}

/// Failure to submit a single memory proposal.
///
/// Carried per record inside a batch report; one failed proposal never
/// aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("profile service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("proposal submission timed out")]
    Timeout,

    #[error("malformed proposal response: {0}")]
    Malformed(String),
}

/// Failure to parse structured candidates out of model output.
///
/// Recovered locally by falling back to the rule extractor; logged as a
/// quality signal, never surfaced to the caller as an error.
#[derive(Debug, Error)]
pub enum ExtractionParseError {
    #[error("model output is not a JSON array: {0}")]
    NotJson(String),

    #[error("every extracted entry was outside the taxonomy")]
    AllOutsideTaxonomy,
}

/// Configuration errors. The missing connection token is the one
/// unrecoverable condition in the whole design.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("A2P_CONNECTION_TOKEN is required; get one from the profile dashboard")]
    MissingConnectionToken,
}
