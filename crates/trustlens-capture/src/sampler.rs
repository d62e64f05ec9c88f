//! Sample acquisition
//!
//! Captures the located element's region as a downscaled JPEG and encodes
//! it for the wire. Every failure mode here (element gone, not enough
//! decoded data, capture error) yields `Ok(None)` rather than an error:
//! all of them mean "no usable frame this cycle" and are handled
//! identically by the agent.

use crate::page::PageSession;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::Element;
use trustlens_core::{Result, Sample, SamplingConfig, SourceHandle};
use tracing::{debug, warn};

// HTMLMediaElement.HAVE_CURRENT_DATA; metadata alone is not enough to draw
const MIN_READY_STATE: f64 = 2.0;

const READY_STATE_PROBE_JS: &str = r#"
function() {
    return this.readyState === undefined ? 4 : this.readyState;
}"#;

/// Sample acquisition options
#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Captures are scaled down by this divisor
    pub scale_divisor: u32,
    /// Minimum edge length in pixels after downscaling
    pub min_edge: u32,
    /// JPEG quality factor (1-100)
    pub jpeg_quality: u32,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            scale_divisor: 3,
            min_edge: 160,
            jpeg_quality: 60,
        }
    }
}

impl SampleOptions {
    pub fn from_config(config: &SamplingConfig) -> Self {
        Self {
            scale_divisor: config.scale_divisor,
            min_edge: config.min_edge,
            jpeg_quality: config.jpeg_quality,
        }
    }
}

/// Capture a downscaled JPEG snapshot of the source element.
///
/// Returns `Ok(None)` when the element has left the DOM, has not buffered
/// enough decoded data yet, or the capture itself fails.
pub fn capture_sample(
    session: &PageSession,
    source: &SourceHandle,
    options: &SampleOptions,
) -> Result<Option<Sample>> {
    let Some(element) = resolve(session, source) else {
        debug!("Source element no longer present: {}", source.selector);
        return Ok(None);
    };

    if !has_decoded_data(&element) {
        debug!("Source has no decoded data yet");
        return Ok(None);
    }

    let scale = capture_scale(
        source.rect.width,
        source.rect.height,
        options.scale_divisor,
        options.min_edge,
    );

    let clip = Page::Viewport {
        x: source.rect.x,
        y: source.rect.y,
        width: source.rect.width,
        height: source.rect.height,
        scale,
    };

    let bytes = match session.tab().capture_screenshot(
        CaptureScreenshotFormatOption::Jpeg,
        Some(options.jpeg_quality),
        Some(clip),
        true,
    ) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Frame capture failed: {}", e);
            return Ok(None);
        }
    };

    debug!("Captured frame ({} bytes, scale {:.2})", bytes.len(), scale);

    Ok(Some(Sample {
        content_b64: BASE64.encode(&bytes),
        width: (source.rect.width * scale).round() as u32,
        height: (source.rect.height * scale).round() as u32,
        captured_at: Utc::now(),
    }))
}

/// Re-resolve the handle to a live element by backend node id.
fn resolve<'a>(session: &'a PageSession, source: &SourceHandle) -> Option<Element<'a>> {
    let elements = session.tab().find_elements(&source.selector).ok()?;
    elements
        .into_iter()
        .find(|element| element.backend_node_id as u64 == source.node_id)
}

fn has_decoded_data(element: &Element<'_>) -> bool {
    let Ok(object) = element.call_js_fn(READY_STATE_PROBE_JS, vec![], false) else {
        return false;
    };
    object
        .value
        .and_then(|value| value.as_f64())
        .is_some_and(|ready_state| ready_state >= MIN_READY_STATE)
}

/// Uniform scale factor: a fraction of native size with a minimum edge
/// floor, never upscaling beyond 1.0.
pub(crate) fn capture_scale(width: f64, height: f64, divisor: u32, min_edge: u32) -> f64 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }

    let floor = min_edge as f64;
    let mut scale = 1.0 / f64::from(divisor.max(1));
    if width * scale < floor {
        scale = floor / width;
    }
    if height * scale < floor {
        scale = scale.max(floor / height);
    }
    scale.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_uses_divisor_for_large_sources() {
        let scale = capture_scale(1920.0, 1080.0, 3, 160);
        assert!((scale - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_respects_minimum_edge() {
        // 300x200 at 1/3 would be 100x67; the floor pushes both edges
        // to at least 160
        let scale = capture_scale(300.0, 200.0, 3, 160);
        assert!(300.0 * scale >= 160.0);
        assert!(200.0 * scale >= 160.0 - 1e-9);
    }

    #[test]
    fn test_scale_never_upscales() {
        assert_eq!(capture_scale(120.0, 120.0, 3, 160), 1.0);
        assert_eq!(capture_scale(0.0, 1080.0, 3, 160), 1.0);
    }

    #[test]
    fn test_options_from_config_defaults() {
        let options = SampleOptions::from_config(&SamplingConfig::default());
        assert_eq!(options.scale_divisor, 3);
        assert_eq!(options.min_edge, 160);
        assert_eq!(options.jpeg_quality, 60);
    }
}
