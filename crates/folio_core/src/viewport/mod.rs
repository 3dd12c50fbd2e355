//! Viewport geometry and intersection math.
//!
//! # Responsibility
//! - Describe the visible window over the document.
//! - Compute visible fractions against a margin-adjusted root rectangle.
//!
//! # Invariants
//! - Ratios are always within `[0.0, 1.0]`.
//! - Layout is single-column: only vertical extents participate.

pub mod watcher;

use serde::{Deserialize, Serialize};

pub use watcher::{IntersectionEntry, VisibilityWatcher, WatcherOptions};

/// Visible window over the document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset (`pageYOffset`).
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn scrolled_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Root rectangle adjustment. Negative values shrink the root.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

impl RootMargin {
    pub fn bottom(bottom: f64) -> Self {
        Self { top: 0.0, bottom }
    }
}

/// Fraction of an element's height visible inside the adjusted root.
///
/// Zero-height elements report `1.0` when they sit inside the root and
/// `0.0` otherwise.
pub fn intersection_ratio(
    offset_top: f64,
    height: f64,
    viewport: &Viewport,
    margin: &RootMargin,
) -> f64 {
    let root_top = viewport.scroll_y - margin.top;
    let root_bottom = viewport.scroll_y + viewport.height + margin.bottom;
    if root_bottom <= root_top {
        return 0.0;
    }

    if height <= 0.0 {
        return if offset_top >= root_top && offset_top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }

    let overlap = (offset_top + height).min(root_bottom) - offset_top.max(root_top);
    (overlap.max(0.0) / height).clamp(0.0, 1.0)
}
