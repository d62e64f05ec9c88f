//! # trustlens-capture
//!
//! Source discovery and frame sampling over Chrome DevTools Protocol.
//!
//! This crate provides the page-facing half of the TrustLens agent:
//!
//! - **Source Locator**: prioritized-selector scan for a qualifying media
//!   element, re-run every cycle
//! - **Sample Acquirer**: downscaled, lossy-compressed snapshot of the
//!   element's region, base64-encoded for the wire
//! - **[`ContentProbe`]**: the seam the agent drives, so cycle logic can
//!   be tested without a browser
//!
//! # Requirements
//!
//! - Chrome or Chromium installed for launched sessions
//! - For connecting to an existing browser: `chrome --remote-debugging-port=9222`

mod locator;
mod page;
mod probe;
mod sampler;

pub use locator::SourceLocator;
pub use page::{PageConfig, PageSession};
pub use probe::{ContentProbe, PageProbe};
pub use sampler::{capture_sample, SampleOptions};
