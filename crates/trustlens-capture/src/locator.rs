//! Source discovery
//!
//! Scans a prioritized selector list and returns the first element that is
//! large enough and inside the viewport. Stateless: the scan is re-run
//! every cycle so player navigation and SPA route changes are picked up
//! without any DOM observers.

use crate::page::PageSession;
use headless_chrome::Element;
use trustlens_core::{Rect, Result, SamplingConfig, SourceHandle};
use tracing::debug;

const RECT_PROBE_JS: &str = r#"
function() {
    const r = this.getBoundingClientRect();
    return JSON.stringify({ x: r.x, y: r.y, width: r.width, height: r.height });
}"#;

/// Prioritized-selector source locator
#[derive(Debug, Clone)]
pub struct SourceLocator {
    selectors: Vec<String>,
    min_width: f64,
    min_height: f64,
}

impl SourceLocator {
    pub fn new(selectors: Vec<String>, min_width: f64, min_height: f64) -> Self {
        Self {
            selectors,
            min_width,
            min_height,
        }
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::new(
            config.selectors.clone(),
            config.min_width,
            config.min_height,
        )
    }

    /// Find the best candidate content element, or `None` when nothing
    /// qualifies. `None` is not an error: it is the normal "nothing to
    /// analyze yet" outcome.
    pub fn locate(&self, session: &PageSession) -> Result<Option<SourceHandle>> {
        for selector in &self.selectors {
            // find_elements fails when the selector matches nothing
            let elements = match session.tab().find_elements(selector) {
                Ok(elements) => elements,
                Err(_) => continue,
            };

            for element in &elements {
                let Some(rect) = element_rect(element) else {
                    continue;
                };

                if qualifies(&rect, self.min_width, self.min_height) {
                    debug!(
                        "Source located via '{}' ({}x{})",
                        selector, rect.width as i64, rect.height as i64
                    );
                    return Ok(Some(SourceHandle {
                        node_id: element.backend_node_id as u64,
                        selector: selector.clone(),
                        rect,
                    }));
                }
            }
        }

        Ok(None)
    }
}

fn element_rect(element: &Element<'_>) -> Option<Rect> {
    let object = element.call_js_fn(RECT_PROBE_JS, vec![], false).ok()?;
    let value = object.value?;
    serde_json::from_str(value.as_str()?).ok()
}

/// Minimum-visible-size and in-viewport predicate
pub(crate) fn qualifies(rect: &Rect, min_width: f64, min_height: f64) -> bool {
    rect.width > min_width
        && rect.height > min_height
        && rect.y + rect.height > 0.0
        && rect.x + rect.width > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_qualifies_requires_minimum_size() {
        assert!(qualifies(&rect(0.0, 0.0, 640.0, 360.0), 100.0, 100.0));
        assert!(!qualifies(&rect(0.0, 0.0, 100.0, 360.0), 100.0, 100.0));
        assert!(!qualifies(&rect(0.0, 0.0, 640.0, 48.0), 100.0, 100.0));
    }

    #[test]
    fn test_qualifies_rejects_elements_scrolled_out() {
        // Fully above the viewport: bottom edge at or before zero
        assert!(!qualifies(&rect(0.0, -500.0, 640.0, 360.0), 100.0, 100.0));
        // Fully left of the viewport
        assert!(!qualifies(&rect(-800.0, 0.0, 640.0, 360.0), 100.0, 100.0));
        // Partially visible still qualifies
        assert!(qualifies(&rect(0.0, -100.0, 640.0, 360.0), 100.0, 100.0));
    }
}
