//! Explicit page view-state store.
//!
//! # Responsibility
//! - Hold every behavior's status as typed state instead of CSS classes.
//! - Enforce one-way transitions (reveal, image load, fade).
//!
//! # Invariants
//! - `RevealState::Revealed` never reverts.
//! - `ImageState::Loaded` never reverts.
//! - Marker classes and styles are derived from this store by `render`.

pub mod render;

use crate::dom::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mobile menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Reveal lifecycle for one observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Observed, not yet seen.
    Pending,
    /// Seen and unobserved; reveal waits on a stagger timer.
    Scheduled,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageState {
    Deferred,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeState {
    Scheduled,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverState {
    Lifted,
    Resting,
}

/// Page-wide view state. Transient: lives for one page lifetime.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub menu: MenuState,
    /// Id of the section the reader has scrolled past most recently.
    pub active_section: Option<String>,
    pub back_to_top: Visibility,
    reveals: BTreeMap<NodeId, RevealState>,
    images: BTreeMap<NodeId, ImageState>,
    fades: BTreeMap<NodeId, FadeState>,
    hovers: BTreeMap<NodeId, HoverState>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` as a pending reveal. Existing state is kept.
    pub fn track_reveal(&mut self, node: NodeId) {
        self.reveals.entry(node).or_insert(RevealState::Pending);
    }

    pub fn reveal_state(&self, node: NodeId) -> Option<RevealState> {
        self.reveals.get(&node).copied()
    }

    /// Moves `Pending` to `Scheduled`. Returns whether it moved.
    pub fn schedule_reveal(&mut self, node: NodeId) -> bool {
        match self.reveals.get_mut(&node) {
            Some(state) if *state == RevealState::Pending => {
                *state = RevealState::Scheduled;
                true
            }
            _ => false,
        }
    }

    /// Marks `node` revealed. Returns `false` when it already was.
    pub fn reveal(&mut self, node: NodeId) -> bool {
        let state = self.reveals.entry(node).or_insert(RevealState::Pending);
        if *state == RevealState::Revealed {
            return false;
        }
        *state = RevealState::Revealed;
        true
    }

    pub fn reveals(&self) -> impl Iterator<Item = (NodeId, RevealState)> + '_ {
        self.reveals.iter().map(|(node, state)| (*node, *state))
    }

    pub fn track_image(&mut self, node: NodeId) {
        self.images.entry(node).or_insert(ImageState::Deferred);
    }

    pub fn image_state(&self, node: NodeId) -> Option<ImageState> {
        self.images.get(&node).copied()
    }

    /// Marks `node` loaded. Returns `false` when it already was.
    pub fn load_image(&mut self, node: NodeId) -> bool {
        let state = self.images.entry(node).or_insert(ImageState::Deferred);
        if *state == ImageState::Loaded {
            return false;
        }
        *state = ImageState::Loaded;
        true
    }

    pub fn images(&self) -> impl Iterator<Item = (NodeId, ImageState)> + '_ {
        self.images.iter().map(|(node, state)| (*node, *state))
    }

    pub fn schedule_fade(&mut self, node: NodeId) {
        self.fades.entry(node).or_insert(FadeState::Scheduled);
    }

    pub fn complete_fade(&mut self, node: NodeId) {
        self.fades.insert(node, FadeState::Visible);
    }

    pub fn fade_state(&self, node: NodeId) -> Option<FadeState> {
        self.fades.get(&node).copied()
    }

    pub fn fades(&self) -> impl Iterator<Item = (NodeId, FadeState)> + '_ {
        self.fades.iter().map(|(node, state)| (*node, *state))
    }

    pub fn set_hover(&mut self, node: NodeId, hover: HoverState) {
        self.hovers.insert(node, hover);
    }

    pub fn hover_state(&self, node: NodeId) -> Option<HoverState> {
        self.hovers.get(&node).copied()
    }

    pub fn hovers(&self) -> impl Iterator<Item = (NodeId, HoverState)> + '_ {
        self.hovers.iter().map(|(node, state)| (*node, *state))
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageState, MenuState, PageState, RevealState};
    use uuid::Uuid;

    #[test]
    fn menu_toggle_round_trips() {
        assert_eq!(MenuState::Closed.toggled().toggled(), MenuState::Closed);
        assert!(MenuState::Closed.toggled().is_open());
    }

    #[test]
    fn reveal_is_one_way() {
        let mut state = PageState::new();
        let node = Uuid::new_v4();
        state.track_reveal(node);

        assert!(state.schedule_reveal(node));
        assert!(!state.schedule_reveal(node));
        assert!(state.reveal(node));
        assert!(!state.reveal(node));

        state.track_reveal(node);
        assert!(!state.schedule_reveal(node));
        assert_eq!(state.reveal_state(node), Some(RevealState::Revealed));
    }

    #[test]
    fn image_load_is_one_way() {
        let mut state = PageState::new();
        let node = Uuid::new_v4();
        state.track_image(node);
        assert_eq!(state.image_state(node), Some(ImageState::Deferred));
        assert!(state.load_image(node));
        assert!(!state.load_image(node));
        state.track_image(node);
        assert_eq!(state.image_state(node), Some(ImageState::Loaded));
    }
}
