// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP relay client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use super::envelope::{RelayEnvelope, RelayResult, RelaySubmission};
use crate::config::RelayConfig;
use crate::error::{Error, Result};

/// Header carrying the relay API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Something that can store a credential remotely
///
/// Implementations must not panic or return early with an error: every
/// failure is folded into [`RelayResult::Failure`].
#[async_trait]
pub trait Relay: Send + Sync {
    /// Submit once, no retry
    async fn submit(&self, submission: &RelaySubmission) -> RelayResult;
}

/// reqwest-backed relay to the configured endpoint
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl RelayClient {
    /// Build a client from relay settings
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let client = Client::builder()
            .user_agent(concat!("tokenrelay/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// Endpoint submissions go to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_submit(&self, submission: &RelaySubmission) -> Result<RelayResult> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, submission.api_key.as_str())
            .json(&submission.body())
            .send()
            .await
            .map_err(|e| Error::from_relay(e, self.timeout))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::from_relay(e, self.timeout))?;

        let envelope = RelayEnvelope::parse(status.as_u16(), &body)?;
        tracing::debug!(
            status = status.as_u16(),
            envelope = %serde_json::to_string(&envelope).unwrap_or_default(),
            "Relay response"
        );

        Ok(envelope.into_result())
    }
}

#[async_trait]
impl Relay for RelayClient {
    async fn submit(&self, submission: &RelaySubmission) -> RelayResult {
        let start = Instant::now();
        let result = self
            .try_submit(submission)
            .await
            .unwrap_or_else(RelayResult::Failure);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            RelayResult::Success { data } => {
                tracing::info!(endpoint = %self.endpoint, elapsed_ms, data = %data, "Credential relayed");
            }
            RelayResult::Failure(err) => {
                tracing::warn!(endpoint = %self.endpoint, elapsed_ms, error = %err, "Credential relay failed");
            }
        }

        result
    }
}
