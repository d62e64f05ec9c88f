//! Resilient HTTP client for the remote scoring service
//!
//! Key design: the client is stateless. A successful failover is reported
//! back as an explicit switch directive in [`ClassifyOutcome`]; only the
//! agent's state machine applies it. The client never touches failure
//! counters or stored verdicts.

use crate::normalize::normalize_response;
use crate::wire::{AnalyzeRequest, AnalyzeResponse, HealthResponse};
use async_trait::async_trait;
use std::time::Duration;
use trustlens_core::{
    ClassificationResult, Endpoint, EndpointsConfig, LensError, Result, Sample,
};

/// Outcome of one classification call
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOutcome {
    pub result: ClassificationResult,
    /// Directive for the state machine: permanently target this endpoint
    /// from the next cycle on. Set only when a fallback attempt succeeded.
    pub switch_to: Option<Endpoint>,
}

/// Classification seam, so the agent can be driven against a mock
#[async_trait]
pub trait Classify {
    /// Submit a sample to the given endpoint, failing over per policy.
    async fn classify(&self, sample: &Sample, endpoint: Endpoint) -> Result<ClassifyOutcome>;
}

/// Client for the dual-endpoint scoring service
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    endpoints: EndpointsConfig,
    timeout: Duration,
}

impl ClassifierClient {
    /// Create a client for the configured endpoint pair
    pub fn new(endpoints: EndpointsConfig) -> Self {
        let timeout = Duration::from_millis(endpoints.request_timeout_ms);
        Self {
            http: reqwest::Client::new(),
            endpoints,
            timeout,
        }
    }

    /// Submit an analyze request, retrying once against the fallback
    /// endpoint on a network-level failure of the primary.
    ///
    /// Protocol failures (non-success status, unparseable body) are not
    /// retried: the service answered, it just answered badly, and the
    /// fallback serves the same implementation.
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest,
        endpoint: Endpoint,
    ) -> Result<ClassifyOutcome> {
        match self.call(self.endpoints.url_for(endpoint), request).await {
            Ok(result) => Ok(ClassifyOutcome {
                result,
                switch_to: None,
            }),
            Err(err) if endpoint == Endpoint::Primary && err.is_network() => {
                tracing::warn!(
                    "Primary endpoint failed ({}), retrying via fallback",
                    err
                );

                let result = self
                    .call(self.endpoints.url_for(Endpoint::Fallback), request)
                    .await?;

                Ok(ClassifyOutcome {
                    result,
                    switch_to: Some(Endpoint::Fallback),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// One POST against one URL, with the bounded timeout
    async fn call(&self, url: &str, request: &AnalyzeRequest) -> Result<ClassificationResult> {
        tracing::debug!("Submitting sample to {}", url);

        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| LensError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(LensError::Protocol {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: AnalyzeResponse = response.json().await.map_err(|e| LensError::Protocol {
            status: status.as_u16(),
            body: format!("Unparseable body: {}", e),
        })?;

        let result = normalize_response(decoded);
        tracing::info!(
            "Classification complete: verdict={} score={:.2}",
            result.verdict,
            result.score
        );

        Ok(result)
    }

    /// Probe the endpoint's `/health` sibling route.
    pub async fn health(&self, endpoint: Endpoint) -> Result<bool> {
        let url = health_url(self.endpoints.url_for(endpoint));

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LensError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(LensError::Protocol {
                status: status.as_u16(),
                body,
            });
        }

        let health: HealthResponse = response.json().await.map_err(|e| LensError::Protocol {
            status: status.as_u16(),
            body: format!("Unparseable body: {}", e),
        })?;

        Ok(health.ok)
    }
}

#[async_trait]
impl Classify for ClassifierClient {
    async fn classify(&self, sample: &Sample, endpoint: Endpoint) -> Result<ClassifyOutcome> {
        let request = AnalyzeRequest::image_b64(sample.content_b64.clone());
        self.analyze(&request, endpoint).await
    }
}

/// Swap the final path segment of an analyze URL for `health`.
fn health_url(analyze_url: &str) -> String {
    match analyze_url.rsplit_once('/') {
        Some((base, _)) => format!("{}/health", base),
        None => format!("{}/health", analyze_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url_derivation() {
        assert_eq!(
            health_url("http://localhost:8000/analyze"),
            "http://localhost:8000/health"
        );
        assert_eq!(
            health_url("http://127.0.0.1:8000/v1/analyze"),
            "http://127.0.0.1:8000/v1/health"
        );
    }

    #[test]
    fn test_client_uses_configured_timeout() {
        let endpoints = EndpointsConfig {
            request_timeout_ms: 250,
            ..EndpointsConfig::default()
        };
        let client = ClassifierClient::new(endpoints);
        assert_eq!(client.timeout, Duration::from_millis(250));
    }
}
