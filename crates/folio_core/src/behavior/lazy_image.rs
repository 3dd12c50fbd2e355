//! Deferred image loading.
//!
//! # Responsibility
//! - Pick a loading strategy once, at mount, from host capabilities.
//! - Move deferred sources into place when images become visible.
//!
//! # Invariants
//! - Each image loads at most once.
//! - `Disabled` never touches images.

use crate::config::HostCapabilities;
use crate::dom::{Document, NodeId};
use crate::state::PageState;
use crate::viewport::{Viewport, VisibilityWatcher, WatcherOptions};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Behavior when intersection observation is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LazyImageFallback {
    /// Load every deferred image at mount.
    Eager,
    /// Leave deferred images alone.
    #[default]
    Disabled,
}

/// Loading strategy selected at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LazyImageStrategy {
    Observed,
    Eager,
    Disabled,
}

impl LazyImageStrategy {
    pub fn select(capabilities: &HostCapabilities, fallback: LazyImageFallback) -> Self {
        if capabilities.intersection_observer {
            return Self::Observed;
        }
        match fallback {
            LazyImageFallback::Eager => Self::Eager,
            LazyImageFallback::Disabled => Self::Disabled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Eager => "eager",
            Self::Disabled => "disabled",
        }
    }
}

/// Deferred image loader bound to one strategy.
#[derive(Debug, Clone)]
pub struct LazyImageLoader {
    strategy: LazyImageStrategy,
    watcher: Option<VisibilityWatcher>,
}

impl LazyImageLoader {
    /// Binds `images` under `strategy`. `Eager` loads them immediately.
    pub fn mount(strategy: LazyImageStrategy, images: &[NodeId], state: &mut PageState) -> Self {
        let mut watcher = None;
        match strategy {
            LazyImageStrategy::Observed => {
                let mut observed = VisibilityWatcher::new(WatcherOptions::default());
                for image in images {
                    state.track_image(*image);
                    observed.observe(*image);
                }
                watcher = Some(observed);
            }
            LazyImageStrategy::Eager => {
                for image in images {
                    state.load_image(*image);
                }
            }
            LazyImageStrategy::Disabled => {}
        }
        info!(
            "event=lazy_images_mounted module=lazy_image status=ok strategy={} count={}",
            strategy.as_str(),
            images.len()
        );
        Self { strategy, watcher }
    }

    pub fn strategy(&self) -> LazyImageStrategy {
        self.strategy
    }

    pub fn pending(&self) -> usize {
        self.watcher
            .as_ref()
            .map_or(0, VisibilityWatcher::observed_count)
    }

    /// Loads every observed image now intersecting. Returns the count loaded.
    pub fn update(
        &mut self,
        document: &Document,
        viewport: &Viewport,
        state: &mut PageState,
    ) -> usize {
        let Some(watcher) = self.watcher.as_mut() else {
            return 0;
        };
        let mut loaded = 0;
        for entry in watcher.collect(document, viewport) {
            if !entry.is_intersecting {
                continue;
            }
            if state.load_image(entry.target) {
                loaded += 1;
            }
            watcher.unobserve(entry.target);
        }
        if loaded > 0 {
            debug!("event=lazy_images_loaded module=lazy_image status=ok count={loaded}");
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::{LazyImageFallback, LazyImageLoader, LazyImageStrategy};
    use crate::config::HostCapabilities;
    use crate::dom::{Document, ElementSpec};
    use crate::state::{ImageState, PageState};
    use crate::viewport::Viewport;

    #[test]
    fn strategy_follows_capability_then_fallback() {
        let with = HostCapabilities::default();
        let without = HostCapabilities::without_intersection_observer();

        assert_eq!(
            LazyImageStrategy::select(&with, LazyImageFallback::Disabled),
            LazyImageStrategy::Observed
        );
        assert_eq!(
            LazyImageStrategy::select(&without, LazyImageFallback::Disabled),
            LazyImageStrategy::Disabled
        );
        assert_eq!(
            LazyImageStrategy::select(&without, LazyImageFallback::Eager),
            LazyImageStrategy::Eager
        );
    }

    #[test]
    fn observed_images_load_on_any_overlap() {
        let document = Document::from_spec(&ElementSpec::new("body").child(
            ElementSpec::new("img")
                .with_attribute("data-src", "portrait.jpg")
                .at(900.0, 300.0),
        ));
        let images = document.select("img[data-src]").expect("selector parses");
        let mut state = PageState::new();
        let mut loader = LazyImageLoader::mount(LazyImageStrategy::Observed, &images, &mut state);

        let viewport = Viewport::new(1280.0, 800.0);
        assert_eq!(loader.update(&document, &viewport, &mut state), 0);
        assert_eq!(state.image_state(images[0]), Some(ImageState::Deferred));

        assert_eq!(loader.update(&document, &viewport.scrolled_to(101.0), &mut state), 1);
        assert_eq!(state.image_state(images[0]), Some(ImageState::Loaded));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn disabled_strategy_never_tracks_images() {
        let document = Document::from_spec(
            &ElementSpec::new("body").child(ElementSpec::new("img").with_attribute("data-src", "a.png")),
        );
        let images = document.select("img[data-src]").expect("selector parses");
        let mut state = PageState::new();
        let mut loader = LazyImageLoader::mount(LazyImageStrategy::Disabled, &images, &mut state);

        assert_eq!(loader.update(&document, &Viewport::default(), &mut state), 0);
        assert_eq!(state.image_state(images[0]), None);
    }
}
