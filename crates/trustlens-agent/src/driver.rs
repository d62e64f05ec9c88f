//! Cycle driver
//!
//! One repeating cycle: locate -> acquire -> classify -> transition ->
//! publish -> compute delay. Exactly one cycle is logically in flight at
//! any time; the next cycle is scheduled only after the current one fully
//! completes, which serializes all state mutation without locks.
//!
//! Every fallible step is folded into a [`CycleEvent`] at the cycle
//! boundary, so the sink is notified and the next cycle is scheduled on
//! every branch, including unexpected probe or transport errors.

use crate::backoff::BackoffPolicy;
use crate::sink::StatusSink;
use crate::state_machine::{transition, CycleEvent};
use std::time::Duration;
use tracing::{debug, warn};
use trustlens_capture::ContentProbe;
use trustlens_client::Classify;
use trustlens_core::{AgentState, LensConfig};

/// The sampling agent: owns the state record and drives cycles
pub struct Agent<P, C, S> {
    probe: P,
    classifier: C,
    sink: S,
    backoff: BackoffPolicy,
    failure_cap: u32,
    initial_delay: Duration,
    state: AgentState,
}

impl<P, C, S> Agent<P, C, S>
where
    P: ContentProbe + Send + Sync,
    C: Classify + Send + Sync,
    S: StatusSink + Send,
{
    pub fn new(probe: P, classifier: C, sink: S, config: &LensConfig) -> Self {
        Self {
            probe,
            classifier,
            sink,
            backoff: BackoffPolicy::from_config(&config.backoff),
            failure_cap: config.backoff.failure_cap,
            initial_delay: Duration::from_millis(config.sampling.initial_delay_ms),
            state: AgentState::default(),
        }
    }

    /// Current agent state
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// The classifier seam
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Run one cycle end-to-end and return the delay before the next one.
    ///
    /// Always notifies the sink, regardless of branch.
    pub async fn run_cycle(&mut self) -> Duration {
        let event = self.observe().await;

        let (next, status) = transition(std::mem::take(&mut self.state), event, self.failure_cap);
        self.state = next;

        self.sink
            .publish(&status, self.state.attached_source.as_ref())
            .await;

        self.backoff.delay_for(self.state.consecutive_failures)
    }

    /// Run cycles forever. Teardown is process exit; there is no stop
    /// transition.
    pub async fn run(&mut self) {
        debug!(
            "Agent starting (initial delay {} ms)",
            self.initial_delay.as_millis()
        );
        tokio::time::sleep(self.initial_delay).await;

        loop {
            let delay = self.run_cycle().await;
            debug!(
                "Cycle complete (failures: {}, next in {} ms)",
                self.state.consecutive_failures,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Observe one cycle's worth of the world, folding every failure into
    /// an event.
    async fn observe(&self) -> CycleEvent {
        let source = match self.probe.locate().await {
            Ok(Some(source)) => source,
            Ok(None) => return CycleEvent::SourceMissing,
            Err(e) => {
                warn!("Source discovery failed: {}", e);
                return CycleEvent::Faulted {
                    error: e.to_string(),
                };
            }
        };

        let sample = match self.probe.acquire(&source).await {
            Ok(Some(sample)) => sample,
            Ok(None) => return CycleEvent::SampleUnavailable { source },
            Err(e) => {
                warn!("Sample acquisition failed: {}", e);
                return CycleEvent::SampleUnavailable { source };
            }
        };

        match self
            .classifier
            .classify(&sample, self.state.active_endpoint)
            .await
        {
            Ok(outcome) => CycleEvent::Classified {
                source,
                result: outcome.result,
                switch_to: outcome.switch_to,
            },
            Err(e) => {
                warn!("Classification failed: {}", e);
                CycleEvent::ClassifyFailed {
                    source,
                    error: e.to_string(),
                }
            }
        }
    }
}
