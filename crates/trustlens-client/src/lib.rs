//! # trustlens-client
//!
//! Resilient remote classifier client for TrustLens.
//!
//! Sends encoded media samples to a trust-scoring service with a bounded
//! timeout, normalizes the free-form response, and fails over between the
//! two configured endpoints:
//!
//! - Only network-level failures (timeout, abort, refused connection)
//!   against the primary trigger the fallback; protocol failures do not
//! - A successful fallback attempt is reported as an explicit switch
//!   directive; the agent applies it permanently (sticky failover)

mod client;
mod normalize;
mod wire;

pub use client::{Classify, ClassifierClient, ClassifyOutcome};
pub use normalize::{normalize_response, normalize_score, normalize_verdict, MIDPOINT_RAW_SCORE};
pub use wire::{AnalyzeRequest, AnalyzeResponse, HealthResponse, TrustEnvelope};
