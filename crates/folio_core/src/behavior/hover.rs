//! Skill tag hover lift.

use crate::dom::NodeId;
use crate::state::{HoverState, PageState};

pub fn on_enter(state: &mut PageState, tag: NodeId) {
    state.set_hover(tag, HoverState::Lifted);
}

pub fn on_leave(state: &mut PageState, tag: NodeId) {
    state.set_hover(tag, HoverState::Resting);
}
