//! # trustlens-core
//!
//! Core types for the TrustLens media trust-scoring agent.
//!
//! TrustLens watches a page for a qualifying media element, periodically
//! samples a frame, submits the sample to a remote trust-scoring service,
//! and keeps a presentation-ready verdict alive through an unreliable
//! network and an unreliable scoring endpoint.
//!
//! ## Core Paradigm
//!
//! - One agent owns one mutable state record; all mutation flows through a
//!   pure transition function
//! - Every failure is recoverable by the next scheduled cycle; nothing in
//!   the agent is fatal to the process
//! - Endpoint failover is sticky: once the fallback succeeds it is
//!   permanent for the agent's lifetime

mod config;
mod error;
mod types;

pub use config::{BackoffConfig, EndpointsConfig, LensConfig, SamplingConfig};
pub use error::{LensError, Result};
pub use types::*;
