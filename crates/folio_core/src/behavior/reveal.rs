//! Scroll-triggered reveal animations.
//!
//! # Responsibility
//! - Reveal whole sections the first time they enter the viewport.
//! - Reveal cards with an index-proportional cascade per delivery batch.
//!
//! # Invariants
//! - A target is unobserved in the same batch that first reports it
//!   intersecting, so it is revealed at most once.
//! - Card cascade order is batch-delivery order, and the index counts every
//!   entry in the batch including non-intersecting ones.

use crate::dom::{Document, NodeId};
use crate::state::PageState;
use crate::viewport::{Viewport, VisibilityWatcher, WatcherOptions};
use log::debug;

/// Section revealer: immediate one-shot reveal.
#[derive(Debug, Clone)]
pub struct SectionRevealer {
    watcher: VisibilityWatcher,
}

impl SectionRevealer {
    pub fn new(options: WatcherOptions) -> Self {
        Self {
            watcher: VisibilityWatcher::new(options),
        }
    }

    pub fn observe(&mut self, state: &mut PageState, targets: &[NodeId]) {
        for target in targets {
            state.track_reveal(*target);
            self.watcher.observe(*target);
        }
    }

    pub fn observed_count(&self) -> usize {
        self.watcher.observed_count()
    }

    /// Processes one watcher batch. Returns how many sections were revealed.
    pub fn update(
        &mut self,
        document: &Document,
        viewport: &Viewport,
        state: &mut PageState,
    ) -> usize {
        let mut revealed = 0;
        for entry in self.watcher.collect(document, viewport) {
            if !entry.is_intersecting {
                continue;
            }
            if state.reveal(entry.target) {
                revealed += 1;
            }
            self.watcher.unobserve(entry.target);
        }
        if revealed > 0 {
            debug!("event=section_reveal module=reveal status=ok count={revealed}");
        }
        revealed
    }
}

/// Card reveal waiting on a stagger timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReveal {
    pub target: NodeId,
    pub delay_ms: u64,
}

/// Card revealer: delayed reveal staggered by batch index.
#[derive(Debug, Clone)]
pub struct CardRevealer {
    watcher: VisibilityWatcher,
    stagger_ms: u64,
}

impl CardRevealer {
    pub fn new(options: WatcherOptions, stagger_ms: u64) -> Self {
        Self {
            watcher: VisibilityWatcher::new(options),
            stagger_ms,
        }
    }

    pub fn observe(&mut self, state: &mut PageState, targets: &[NodeId]) {
        for target in targets {
            state.track_reveal(*target);
            self.watcher.observe(*target);
        }
    }

    pub fn observed_count(&self) -> usize {
        self.watcher.observed_count()
    }

    /// Processes one watcher batch and returns reveals for the caller to time.
    pub fn update(
        &mut self,
        document: &Document,
        viewport: &Viewport,
        state: &mut PageState,
    ) -> Vec<ScheduledReveal> {
        let batch = self.watcher.collect(document, viewport);
        let mut scheduled = Vec::new();
        for (index, entry) in batch.iter().enumerate() {
            if !entry.is_intersecting {
                continue;
            }
            self.watcher.unobserve(entry.target);
            if state.schedule_reveal(entry.target) {
                scheduled.push(ScheduledReveal {
                    target: entry.target,
                    delay_ms: self.stagger_ms.saturating_mul(index as u64),
                });
            }
        }
        if !scheduled.is_empty() {
            debug!(
                "event=card_reveal_scheduled module=reveal status=ok count={} batch={}",
                scheduled.len(),
                batch.len()
            );
        }
        scheduled
    }
}
