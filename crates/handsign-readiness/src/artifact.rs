//! Model artifact reachability
//!
//! Only metadata is requested: a `HEAD` against the artifact URL, so the
//! (potentially large) model body is never transferred.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, Url};

use handsign_core::{HandsignError, HandsignResult};

/// Response metadata for the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactStatus {
    /// HTTP status code
    pub status: u16,
    /// Size advertised by the server, if any
    pub content_length: Option<u64>,
}

impl ArtifactStatus {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of artifact metadata
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch metadata only; a non-2xx status is returned as `Ok`
    async fn head(&self, url: &Url) -> HandsignResult<ArtifactStatus>;
}

/// Artifact source backed by HTTP `HEAD`
#[derive(Debug, Clone)]
pub struct HttpArtifactSource {
    client: Client,
    timeout: Duration,
}

impl HttpArtifactSource {
    /// Create a new source with the default 5s timeout
    pub fn new() -> HandsignResult<Self> {
        Self::with_timeout(Duration::from_secs(5))
    }

    /// Create with custom timeout
    pub fn with_timeout(timeout: Duration) -> HandsignResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HandsignError::Config(format!("http client: {}", e)))?;

        Ok(Self::with_client(client, timeout))
    }

    /// Reuse an existing client, e.g. one with custom proxy settings
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ArtifactSource for HttpArtifactSource {
    async fn head(&self, url: &Url) -> HandsignResult<ArtifactStatus> {
        let response = self
            .client
            .head(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HandsignError::Transport(e.to_string()))?;

        // Body size hints are empty for HEAD, so read the header itself
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        Ok(ArtifactStatus {
            status: response.status().as_u16(),
            content_length,
        })
    }
}
