//! Pure state machine for the sampling cycle
//!
//! All state transitions are deterministic and testable: no async, no I/O.
//! The driver folds everything that happened during a cycle into a single
//! [`CycleEvent`] and this module turns it into the next state plus the
//! status handed to the rendering sink. No other code path writes
//! [`AgentState`].

use trustlens_core::{AgentState, ClassificationResult, Endpoint, SourceHandle, Status};

/// What one cycle observed
#[derive(Debug, Clone, PartialEq)]
pub enum CycleEvent {
    /// No qualifying source element this cycle
    SourceMissing,
    /// Source found but no usable sample could be extracted
    SampleUnavailable { source: SourceHandle },
    /// Sample submitted and classified successfully
    Classified {
        source: SourceHandle,
        result: ClassificationResult,
        /// Endpoint switch directive reported by the classifier client
        switch_to: Option<Endpoint>,
    },
    /// Sample submitted but classification failed
    ClassifyFailed { source: SourceHandle, error: String },
    /// The cycle body itself failed unexpectedly (probe transport error,
    /// browser gone)
    Faulted { error: String },
}

/// Pure state transition function
///
/// Takes the state and the cycle's event, returns the next state and the
/// status to emit. Failure counting saturates at `failure_cap` and resets
/// to zero exactly on a successful classification. The endpoint switch is
/// sticky: once the state targets the fallback it never reverts.
pub fn transition(state: AgentState, event: CycleEvent, failure_cap: u32) -> (AgentState, Status) {
    let mut next = state;

    match event {
        CycleEvent::SourceMissing => {
            // Keep the previous anchor; a returning player reuses it
            next.consecutive_failures = saturating_count(next.consecutive_failures, failure_cap);
            (next, Status::Hidden)
        }

        CycleEvent::SampleUnavailable { source } => {
            next.attached_source = Some(source);
            next.consecutive_failures = saturating_count(next.consecutive_failures, failure_cap);
            (next, Status::Offline)
        }

        CycleEvent::Classified {
            source,
            result,
            switch_to,
        } => {
            next.attached_source = Some(source);
            next.consecutive_failures = 0;
            next.last_verdict = Some(result.verdict);
            next.last_score = Some(result.score);

            if let Some(endpoint) = switch_to {
                if next.active_endpoint == Endpoint::Primary {
                    next.active_endpoint = endpoint;
                }
            }

            let status = Status::Scored {
                verdict: result.verdict,
                score: result.score,
            };
            (next, status)
        }

        CycleEvent::ClassifyFailed { source, .. } => {
            next.attached_source = Some(source);
            next.consecutive_failures = saturating_count(next.consecutive_failures, failure_cap);
            (next, Status::Offline)
        }

        CycleEvent::Faulted { .. } => {
            next.consecutive_failures = saturating_count(next.consecutive_failures, failure_cap);
            (next, Status::Offline)
        }
    }
}

fn saturating_count(failures: u32, cap: u32) -> u32 {
    failures.saturating_add(1).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustlens_core::{Rect, Verdict};

    const CAP: u32 = 6;

    fn source() -> SourceHandle {
        SourceHandle {
            node_id: 7,
            selector: "video".to_string(),
            rect: Rect {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 360.0,
            },
        }
    }

    fn scored(verdict: Verdict, score: f64) -> ClassificationResult {
        ClassificationResult {
            verdict,
            score,
            explanations: Vec::new(),
        }
    }

    #[test]
    fn test_source_missing_hides_and_counts() {
        let (state, status) = transition(AgentState::default(), CycleEvent::SourceMissing, CAP);
        assert_eq!(status, Status::Hidden);
        assert_eq!(state.consecutive_failures, 1);
        assert!(state.attached_source.is_none());
    }

    #[test]
    fn test_source_missing_keeps_previous_anchor() {
        let state = AgentState {
            attached_source: Some(source()),
            ..AgentState::default()
        };
        let (state, status) = transition(state, CycleEvent::SourceMissing, CAP);
        assert_eq!(status, Status::Hidden);
        assert_eq!(state.attached_source, Some(source()));
    }

    #[test]
    fn test_sample_unavailable_is_offline_and_counts() {
        let (state, status) = transition(
            AgentState::default(),
            CycleEvent::SampleUnavailable { source: source() },
            CAP,
        );
        assert_eq!(status, Status::Offline);
        assert_eq!(state.consecutive_failures, 1);
        assert_eq!(state.attached_source, Some(source()));
    }

    #[test]
    fn test_classified_resets_counter_and_stores_result() {
        let state = AgentState {
            consecutive_failures: 4,
            ..AgentState::default()
        };

        let (state, status) = transition(
            state,
            CycleEvent::Classified {
                source: source(),
                result: scored(Verdict::Ai, 0.95),
                switch_to: None,
            },
            CAP,
        );

        assert_eq!(
            status,
            Status::Scored {
                verdict: Verdict::Ai,
                score: 0.95
            }
        );
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.last_verdict, Some(Verdict::Ai));
        assert_eq!(state.last_score, Some(0.95));
        assert_eq!(state.active_endpoint, Endpoint::Primary);
    }

    #[test]
    fn test_switch_directive_is_applied_once() {
        let (state, _) = transition(
            AgentState::default(),
            CycleEvent::Classified {
                source: source(),
                result: scored(Verdict::Human, 0.8),
                switch_to: Some(Endpoint::Fallback),
            },
            CAP,
        );
        assert_eq!(state.active_endpoint, Endpoint::Fallback);

        // Already on the fallback: a stray directive changes nothing
        let (state, _) = transition(
            state,
            CycleEvent::Classified {
                source: source(),
                result: scored(Verdict::Human, 0.8),
                switch_to: Some(Endpoint::Fallback),
            },
            CAP,
        );
        assert_eq!(state.active_endpoint, Endpoint::Fallback);
    }

    #[test]
    fn test_endpoint_never_reverts_on_failure() {
        let state = AgentState {
            active_endpoint: Endpoint::Fallback,
            ..AgentState::default()
        };

        let (state, status) = transition(
            state,
            CycleEvent::ClassifyFailed {
                source: source(),
                error: "connection refused".to_string(),
            },
            CAP,
        );

        assert_eq!(status, Status::Offline);
        assert_eq!(state.active_endpoint, Endpoint::Fallback);
    }

    #[test]
    fn test_failure_counter_saturates_at_cap() {
        let mut state = AgentState::default();
        for _ in 0..10 {
            let (next, _) = transition(state, CycleEvent::SourceMissing, CAP);
            state = next;
        }
        assert_eq!(state.consecutive_failures, CAP);
    }

    #[test]
    fn test_failure_then_success_resets_to_zero() {
        let mut state = AgentState::default();
        for _ in 0..3 {
            let (next, _) = transition(
                state,
                CycleEvent::ClassifyFailed {
                    source: source(),
                    error: "timeout".to_string(),
                },
                CAP,
            );
            state = next;
        }
        assert_eq!(state.consecutive_failures, 3);

        let (state, _) = transition(
            state,
            CycleEvent::Classified {
                source: source(),
                result: scored(Verdict::Human, 0.7),
                switch_to: None,
            },
            CAP,
        );
        assert_eq!(state.consecutive_failures, 0);
    }

    #[test]
    fn test_fault_is_offline_and_counts() {
        let (state, status) = transition(
            AgentState::default(),
            CycleEvent::Faulted {
                error: "browser connection lost".to_string(),
            },
            CAP,
        );
        assert_eq!(status, Status::Offline);
        assert_eq!(state.consecutive_failures, 1);
    }

    #[test]
    fn test_classify_failure_preserves_last_verdict() {
        let state = AgentState {
            last_verdict: Some(Verdict::Human),
            last_score: Some(0.9),
            ..AgentState::default()
        };

        let (state, _) = transition(
            state,
            CycleEvent::ClassifyFailed {
                source: source(),
                error: "HTTP 503".to_string(),
            },
            CAP,
        );

        assert_eq!(state.last_verdict, Some(Verdict::Human));
        assert_eq!(state.last_score, Some(0.9));
    }
}
