//! Wire contract for the remote scoring service
//!
//! Requests carry either an inline base64 payload or a content URL; the
//! agent always sends inline payloads, the URL form exists for one-shot
//! analysis of already-hosted media. Responses are decoded defensively:
//! every field is optional and falls back to a named default during
//! normalization.

use serde::{Deserialize, Serialize};

/// POST body for the `/analyze` route
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    /// Media kind; the agent only submits `"image"`
    #[serde(rename = "type")]
    pub content_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_b64: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}

impl AnalyzeRequest {
    /// Request carrying an inline base64-encoded image
    pub fn image_b64(content_b64: impl Into<String>) -> Self {
        Self {
            content_type: "image".to_string(),
            content_b64: Some(content_b64.into()),
            content_url: None,
        }
    }

    /// Request pointing at an already-hosted image
    pub fn image_url(content_url: impl Into<String>) -> Self {
        Self {
            content_type: "image".to_string(),
            content_b64: None,
            content_url: Some(content_url.into()),
        }
    }
}

/// Response body of the `/analyze` route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub trust: Option<TrustEnvelope>,
}

/// Nested trust verdict block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrustEnvelope {
    #[serde(default)]
    pub verdict: Option<String>,

    /// Either a 0-1 probability or a 0-100 percentage; normalized before use
    #[serde(default)]
    pub trust_score: Option<f64>,

    #[serde(default)]
    pub explanations: Vec<String>,
}

/// Response body of the `/health` route
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub ok: bool,
}
