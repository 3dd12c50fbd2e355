//! Threshold-based visibility watcher.
//!
//! # Responsibility
//! - Track a set of observed elements against the viewport.
//! - Report intersection state changes in delivery batches.
//!
//! # Invariants
//! - A freshly observed target always reports in its next batch.
//! - Afterwards a target reports only when its intersecting state flips.
//! - Batch order is observation order.
//! - Unobserved targets never report again unless re-observed.

use crate::dom::{Document, NodeId};
use crate::viewport::{intersection_ratio, RootMargin, Viewport};

/// Watcher configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatcherOptions {
    /// Visible fraction needed to count as intersecting. `0.0` means any overlap.
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::default(),
        }
    }
}

/// One delivered observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Observation {
    target: NodeId,
    last_intersecting: Option<bool>,
}

/// Viewport-intersection watcher over document elements.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    options: WatcherOptions,
    observations: Vec<Observation>,
}

impl VisibilityWatcher {
    pub fn new(options: WatcherOptions) -> Self {
        Self {
            options,
            observations: Vec::new(),
        }
    }

    /// Starts observing `target`. Observing twice is a no-op.
    pub fn observe(&mut self, target: NodeId) {
        if self.is_observing(target) {
            return;
        }
        self.observations.push(Observation {
            target,
            last_intersecting: None,
        });
    }

    /// Stops observing `target`. Returns whether it was observed.
    pub fn unobserve(&mut self, target: NodeId) -> bool {
        let before = self.observations.len();
        self.observations
            .retain(|observation| observation.target != target);
        before != self.observations.len()
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observations
            .iter()
            .any(|observation| observation.target == target)
    }

    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    /// Computes the next batch of entries for the current layout.
    ///
    /// Targets missing from `document` are skipped without reporting.
    pub fn collect(&mut self, document: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let mut batch = Vec::new();
        for observation in &mut self.observations {
            let Some(element) = document.get(observation.target) else {
                continue;
            };
            let ratio = intersection_ratio(
                element.offset_top,
                element.height,
                viewport,
                &self.options.root_margin,
            );
            let is_intersecting = ratio > 0.0 && ratio >= self.options.threshold;
            if observation.last_intersecting == Some(is_intersecting) {
                continue;
            }
            observation.last_intersecting = Some(is_intersecting);
            batch.push(IntersectionEntry {
                target: observation.target,
                ratio,
                is_intersecting,
            });
        }
        batch
    }
}
