//! Core type definitions for the TrustLens agent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical classification of a media sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Human,
    Ai,
    #[default]
    Uncertain,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Ai => write!(f, "ai"),
            Self::Uncertain => write!(f, "uncertain"),
        }
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "ai" => Ok(Self::Ai),
            "uncertain" => Ok(Self::Uncertain),
            _ => Err(format!("Invalid verdict: {}", s)),
        }
    }
}

/// Which scoring endpoint the agent currently targets
///
/// The transition Primary -> Fallback happens at most once per agent
/// lifetime and never reverts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Primary,
    Fallback,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Viewport rectangle of a located element, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Identity of the element currently being sampled
///
/// Handed to the rendering sink every cycle so presentation can decide
/// whether it must re-anchor to a new element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceHandle {
    /// CDP backend node id of the element
    pub node_id: u64,
    /// Selector that matched the element
    pub selector: String,
    /// Viewport rectangle at locate time
    pub rect: Rect,
}

/// An encoded snapshot of the source at a point in time
///
/// Bounded size, lossy-compressed. Exists only for the duration of one
/// classification call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Base64-encoded JPEG payload
    pub content_b64: String,
    /// Encoded width in pixels
    pub width: u32,
    /// Encoded height in pixels
    pub height: u32,
    /// When the frame was captured
    pub captured_at: DateTime<Utc>,
}

/// Normalized output of one successful remote classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub verdict: Verdict,
    /// Trust score in [0, 1]
    pub score: f64,
    /// Human-readable signals reported by the scoring service
    #[serde(default)]
    pub explanations: Vec<String>,
}

/// The agent's externally observable summary for one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Status {
    /// No qualifying source found this cycle
    Hidden,
    /// Classification failed or no usable sample was produced
    Offline,
    /// Classification succeeded this cycle
    Scored { verdict: Verdict, score: f64 },
}

/// Mutable agent state, owned by the cycle driver
///
/// Mutated only through the state machine's transition function; no other
/// code path writes this record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Consecutive failed cycles, clamped to the failure cap
    pub consecutive_failures: u32,
    pub last_verdict: Option<Verdict>,
    /// Always within [0, 1] when present
    pub last_score: Option<f64>,
    pub active_endpoint: Endpoint,
    pub attached_source: Option<SourceHandle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_round_trip() {
        assert_eq!("human".parse::<Verdict>().unwrap(), Verdict::Human);
        assert_eq!("AI".parse::<Verdict>().unwrap(), Verdict::Ai);
        assert_eq!("uncertain".parse::<Verdict>().unwrap(), Verdict::Uncertain);
        assert!("fake".parse::<Verdict>().is_err());
        assert_eq!(Verdict::Ai.to_string(), "ai");
    }

    #[test]
    fn test_default_state_targets_primary() {
        let state = AgentState::default();
        assert_eq!(state.active_endpoint, Endpoint::Primary);
        assert_eq!(state.consecutive_failures, 0);
        assert!(state.last_verdict.is_none());
        assert!(state.attached_source.is_none());
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let status = Status::Scored {
            verdict: Verdict::Ai,
            score: 0.95,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "scored");
        assert_eq!(json["verdict"], "ai");
    }
}
