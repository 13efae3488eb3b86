//! HTTP client for a real profile service.
//!
//! Implements [`ProfileStore`] over the service's two endpoints:
//! `GET /v1/profile?scopes=...` and `POST /v1/memories/proposals`.
//! Authenticates with the connection token as a bearer credential. The
//! token is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building request headers; the struct deliberately does not
//! derive `Debug`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use a2p_core::profile::ProfileStore;
use a2p_types::error::{ProfileError, ProposalError};
use a2p_types::memory::CandidateRecord;
use a2p_types::profile::{ProfileView, ProposalHandle};
use a2p_types::scope::ScopeSet;

use crate::wire::{ProfileResponse, ProposalRequest, ProposalResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer-token client for the external profile service.
pub struct HttpProfileStore {
    client: reqwest::Client,
    connection_token: SecretString,
    base_url: String,
}

impl HttpProfileStore {
    /// `base_url` is the service root without a trailing slash, e.g.
    /// `https://api.a2p.dev`.
    pub fn new(connection_token: SecretString, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            connection_token,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn profile_error(e: reqwest::Error) -> ProfileError {
    if e.is_timeout() {
        ProfileError::Timeout
    } else if e.is_decode() {
        ProfileError::Malformed(e.to_string())
    } else {
        ProfileError::Transport(e.to_string())
    }
}

fn proposal_error(e: reqwest::Error) -> ProposalError {
    if e.is_timeout() {
        ProposalError::Timeout
    } else if e.is_decode() {
        ProposalError::Malformed(e.to_string())
    } else {
        ProposalError::Transport(e.to_string())
    }
}

impl ProfileStore for HttpProfileStore {
    async fn read_profile(&self, scopes: &ScopeSet) -> Result<ProfileView, ProfileError> {
        let response = self
            .client
            .get(self.url("/v1/profile"))
            .query(&[("scopes", scopes.to_query_value())])
            .bearer_auth(self.connection_token.expose_secret())
            .send()
            .await
            .map_err(profile_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "profile read rejected by service");
            return Err(ProfileError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ProfileResponse = response.json().await.map_err(profile_error)?;
        Ok(body.into())
    }

    async fn propose(
        &self,
        origin: &str,
        candidate: &CandidateRecord,
    ) -> Result<ProposalHandle, ProposalError> {
        let kind = candidate.kind.to_string();
        let body = ProposalRequest::new(origin, candidate, &kind);

        let response = self
            .client
            .post(self.url("/v1/memories/proposals"))
            .bearer_auth(self.connection_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(proposal_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "proposal rejected by service");
            return Err(ProposalError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ProposalResponse = response.json().await.map_err(proposal_error)?;
        Ok(ProposalHandle::new(body.proposal_id))
    }
}
