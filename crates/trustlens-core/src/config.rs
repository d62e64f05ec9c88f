//! Configuration management for TrustLens
//!
//! This module provides configuration structures for the sampling agent,
//! including scoring endpoints, source selection, sampling geometry, and
//! backoff pacing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Endpoint, Result};

/// Agent configuration
///
/// Loaded from `trustlens.toml`; every field has a default so a missing
/// file yields a fully working configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LensConfig {
    /// Scoring endpoint pair and request bounds
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Source discovery and sample acquisition
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Failure-aware cycle pacing
    #[serde(default)]
    pub backoff: BackoffConfig,
}

/// Scoring endpoint configuration
///
/// Two candidate URLs with an identical payload/response contract; only the
/// URL differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Primary analyze endpoint
    #[serde(default = "default_primary_url")]
    pub primary: String,

    /// Fallback analyze endpoint, tried once after a network-level failure
    /// against the primary
    #[serde(default = "default_fallback_url")]
    pub fallback: String,

    /// Per-request timeout in milliseconds; on expiry the in-flight call is
    /// aborted and treated as a network failure
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Source discovery and sample acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Prioritized selector list; platform-specific container patterns
    /// first, the generic fallback last. The first element satisfying the
    /// size and viewport predicates wins.
    #[serde(default = "default_selectors")]
    pub selectors: Vec<String>,

    /// Minimum visible width in CSS pixels for a candidate to qualify
    #[serde(default = "default_min_dimension")]
    pub min_width: f64,

    /// Minimum visible height in CSS pixels for a candidate to qualify
    #[serde(default = "default_min_dimension")]
    pub min_height: f64,

    /// Captures are scaled down by this divisor to cap payload size
    #[serde(default = "default_scale_divisor")]
    pub scale_divisor: u32,

    /// Minimum edge length in pixels after downscaling
    #[serde(default = "default_min_edge")]
    pub min_edge: u32,

    /// JPEG quality factor (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u32,

    /// Delay before the first cycle after start-up, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

/// Backoff pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay at zero or one consecutive failures, in milliseconds
    #[serde(default = "default_backoff_base_ms")]
    pub base_ms: u64,

    /// Worst-case delay after repeated failures, in milliseconds
    #[serde(default = "default_backoff_cap_ms")]
    pub cap_ms: u64,

    /// Saturation point of the consecutive-failure counter
    #[serde(default = "default_failure_cap")]
    pub failure_cap: u32,
}

// Default value providers
fn default_primary_url() -> String {
    "http://localhost:8000/analyze".to_string()
}

fn default_fallback_url() -> String {
    "http://127.0.0.1:8000/analyze".to_string()
}

fn default_request_timeout_ms() -> u64 {
    4000
}

fn default_selectors() -> Vec<String> {
    vec![
        "video.html5-main-video".to_string(),
        "div[data-testid=\"videoPlayer\"] video".to_string(),
        ".video-player video".to_string(),
        "video".to_string(),
    ]
}

fn default_min_dimension() -> f64 {
    100.0
}

fn default_scale_divisor() -> u32 {
    3
}

fn default_min_edge() -> u32 {
    160
}

fn default_jpeg_quality() -> u32 {
    60
}

fn default_initial_delay_ms() -> u64 {
    800
}

fn default_backoff_base_ms() -> u64 {
    2000
}

fn default_backoff_cap_ms() -> u64 {
    10000
}

fn default_failure_cap() -> u32 {
    6
}

impl EndpointsConfig {
    /// URL for the given endpoint choice
    pub fn url_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Primary => &self.primary,
            Endpoint::Fallback => &self.fallback,
        }
    }
}

impl LensConfig {
    /// Load configuration from the given file or use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content).map_err(|e| {
                crate::LensError::Config(format!("Failed to parse config file: {}", e))
            })?)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to the given file
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let config = Self::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| crate::LensError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_url(),
            fallback: default_fallback_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            selectors: default_selectors(),
            min_width: default_min_dimension(),
            min_height: default_min_dimension(),
            scale_divisor: default_scale_divisor(),
            min_edge: default_min_edge(),
            jpeg_quality: default_jpeg_quality(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_ms: default_backoff_base_ms(),
            cap_ms: default_backoff_cap_ms(),
            failure_cap: default_failure_cap(),
        }
    }
}
