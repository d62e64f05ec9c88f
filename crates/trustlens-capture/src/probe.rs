//! The probe seam between the agent and the page
//!
//! The agent is generic over this trait so its cycle logic can be tested
//! against scripted probes without a browser.

use crate::locator::SourceLocator;
use crate::page::PageSession;
use crate::sampler::{capture_sample, SampleOptions};
use async_trait::async_trait;
use trustlens_core::{Result, Sample, SamplingConfig, SourceHandle};

/// Capability to discover a content element and sample it
#[async_trait]
pub trait ContentProbe {
    /// Find the current best candidate source, if any.
    async fn locate(&self) -> Result<Option<SourceHandle>>;

    /// Extract a sample from the source, or `None` when no usable frame
    /// is available yet.
    async fn acquire(&self, source: &SourceHandle) -> Result<Option<Sample>>;
}

/// CDP-backed probe over a live page session
pub struct PageProbe {
    session: PageSession,
    locator: SourceLocator,
    options: SampleOptions,
}

impl PageProbe {
    pub fn new(session: PageSession, config: &SamplingConfig) -> Self {
        Self {
            session,
            locator: SourceLocator::from_config(config),
            options: SampleOptions::from_config(config),
        }
    }
}

#[async_trait]
impl ContentProbe for PageProbe {
    async fn locate(&self) -> Result<Option<SourceHandle>> {
        self.locator.locate(&self.session)
    }

    async fn acquire(&self, source: &SourceHandle) -> Result<Option<Sample>> {
        capture_sample(&self.session, source, &self.options)
    }
}
