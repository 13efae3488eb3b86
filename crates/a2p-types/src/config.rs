//! Environment-driven configuration surface.
//!
//! The core consumes exactly three settings: the profile service
//! credential (required), an optional model credential, and an optional
//! alternate service endpoint. Everything else -- CLI flags, demo mode
//! -- belongs to the binary.
//!
//! Credentials are wrapped in [`secrecy::SecretString`] so they never
//! appear in `Debug` output or logs.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default base URL of the profile service.
pub const DEFAULT_API_URL: &str = "https://api.a2p.dev";

/// Configuration for one exchange run.
#[derive(Debug)]
pub struct ExchangeConfig {
    /// Connection token for the profile service. Required: every other
    /// behavior depends on it.
    pub connection_token: SecretString,
    /// Base URL of the profile service.
    pub api_url: String,
    /// Optional model credential. When absent, sessions run with the
    /// rule-based extractor and a scripted responder.
    pub model_api_key: Option<SecretString>,
}

impl ExchangeConfig {
    /// Build a config from raw values, validating the one unrecoverable
    /// condition: a missing connection token.
    pub fn new(
        connection_token: Option<String>,
        api_url: Option<String>,
        model_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = connection_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingConnectionToken)?;

        Ok(Self {
            connection_token: SecretString::from(token),
            api_url: api_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model_api_key: model_api_key
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
        })
    }

    /// Load from the process environment.
    ///
    /// Variables: `A2P_CONNECTION_TOKEN` (required), `A2P_API_URL`,
    /// `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            std::env::var("A2P_CONNECTION_TOKEN").ok(),
            std::env::var("A2P_API_URL").ok(),
            std::env::var("ANTHROPIC_API_KEY").ok(),
        )
    }

    /// Whether a model credential is present (selects the model-backed
    /// strategies at session construction).
    pub fn has_model(&self) -> bool {
        self.model_api_key.is_some()
    }
}
