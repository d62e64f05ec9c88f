//! # trustlens-agent
//!
//! Cycle driver and status state machine for TrustLens.
//!
//! The agent repeats a single cycle forever: locate a source, acquire a
//! sample, classify it remotely, fold the outcome into the state record,
//! notify the rendering sink, and schedule the next cycle with
//! failure-aware backoff.
//!
//! ## Key guarantees
//!
//! - The sink is notified and the next cycle is scheduled on every
//!   branch, including unexpected errors
//! - All state mutation flows through the pure transition function; no
//!   locks are needed because cycles never overlap
//! - The endpoint switch directive reported by the classifier is applied
//!   here, and only here, and is sticky for the agent's lifetime

mod backoff;
mod driver;
mod sink;
mod state_machine;

pub use backoff::BackoffPolicy;
pub use driver::Agent;
pub use sink::{LogSink, StatusSink};
pub use state_machine::{transition, CycleEvent};
