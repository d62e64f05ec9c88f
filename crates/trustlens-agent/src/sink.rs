//! The rendering seam
//!
//! A sink receives the derived status after every cycle, together with
//! the current source handle so badge-like consumers can re-anchor when
//! the sampled element changes. Sinks must tolerate repeated identical
//! statuses and must not fail the cycle.

use async_trait::async_trait;
use trustlens_core::{SourceHandle, Status};
use tracing::{debug, info};

/// Consumer of per-cycle statuses
#[async_trait]
pub trait StatusSink {
    async fn publish(&mut self, status: &Status, source: Option<&SourceHandle>);
}

/// Sink that reports statuses through the tracing subscriber
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl StatusSink for LogSink {
    async fn publish(&mut self, status: &Status, source: Option<&SourceHandle>) {
        match status {
            Status::Hidden => debug!("No qualifying source; verdict hidden"),
            Status::Offline => info!(
                "Offline (source: {})",
                source.map(|s| s.selector.as_str()).unwrap_or("none")
            ),
            Status::Scored { verdict, score } => info!(
                "Scored: verdict={} score={:.2} (source: {})",
                verdict,
                score,
                source.map(|s| s.selector.as_str()).unwrap_or("none")
            ),
        }
    }
}
