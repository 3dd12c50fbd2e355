//! Projection from `PageState` onto document classes, styles and attributes.
//!
//! # Invariants
//! - This is the only writer of marker classes and inline styles.
//! - Projection is idempotent: projecting twice equals projecting once.
//! - `adopt_markup` runs before the first projection so marker classes the
//!   markup ships with survive mount.

use crate::dom::{Document, NodeId};
use crate::state::{
    FadeState, HoverState, ImageState, MenuState, PageState, RevealState, Visibility,
};

pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_SHOW: &str = "show";
pub const CLASS_REVEALED: &str = "slide-in-up";
pub const CLASS_LOADED: &str = "loaded";

pub const ATTR_DEFERRED_SOURCE: &str = "data-src";
pub const ATTR_SOURCE: &str = "src";

const HOVER_LIFTED_TRANSFORM: &str = "scale(1.1) rotate(1deg)";
const HOVER_RESTING_TRANSFORM: &str = "scale(1) rotate(0deg)";

/// Elements whose presentation is driven by page-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTargets {
    pub menu_toggle: NodeId,
    pub menu: NodeId,
    pub back_to_top: NodeId,
    pub nav_links: Vec<NodeId>,
}

/// Section id a nav link points at: the href with its first character dropped.
fn link_fragment(href: &str) -> &str {
    href.get(1..).unwrap_or_default()
}

/// Seeds page-wide state from marker classes already present in the markup.
pub fn adopt_markup(state: &mut PageState, document: &Document, targets: &RenderTargets) {
    let has = |node: NodeId, class: &str| document.get(node).is_some_and(|e| e.has_class(class));

    if has(targets.menu_toggle, CLASS_ACTIVE) || has(targets.menu, CLASS_ACTIVE) {
        state.menu = MenuState::Open;
    }
    if has(targets.back_to_top, CLASS_SHOW) {
        state.back_to_top = Visibility::Shown;
    }
    state.active_section = targets
        .nav_links
        .iter()
        .filter(|link| has(**link, CLASS_ACTIVE))
        .find_map(|link| document.get(*link)?.attribute("href"))
        .map(|href| link_fragment(href).to_string());
}

/// Writes the presentation implied by `state` into `document`.
pub fn project(state: &PageState, document: &mut Document, targets: &RenderTargets) {
    let menu_open = state.menu.is_open();
    for node in [targets.menu_toggle, targets.menu] {
        if let Some(element) = document.get_mut(node) {
            element.set_class(CLASS_ACTIVE, menu_open);
        }
    }

    for link in &targets.nav_links {
        let is_current = match (&state.active_section, document.get(*link)) {
            (Some(section), Some(element)) => element
                .attribute("href")
                .is_some_and(|href| link_fragment(href) == section.as_str()),
            _ => false,
        };
        if let Some(element) = document.get_mut(*link) {
            element.set_class(CLASS_ACTIVE, is_current);
        }
    }

    if let Some(element) = document.get_mut(targets.back_to_top) {
        element.set_class(CLASS_SHOW, state.back_to_top == Visibility::Shown);
    }

    for (node, reveal) in state.reveals() {
        if reveal == RevealState::Revealed {
            if let Some(element) = document.get_mut(node) {
                element.add_class(CLASS_REVEALED);
            }
        }
    }

    for (node, image) in state.images() {
        if image != ImageState::Loaded {
            continue;
        }
        if let Some(element) = document.get_mut(node) {
            if let Some(source) = element.attribute(ATTR_DEFERRED_SOURCE).map(str::to_string) {
                element.set_attribute(ATTR_SOURCE, source);
            }
            element.add_class(CLASS_LOADED);
        }
    }

    for (node, fade) in state.fades() {
        if fade == FadeState::Visible {
            if let Some(element) = document.get_mut(node) {
                element.set_style("opacity", "1");
            }
        }
    }

    for (node, hover) in state.hovers() {
        let transform = match hover {
            HoverState::Lifted => HOVER_LIFTED_TRANSFORM,
            HoverState::Resting => HOVER_RESTING_TRANSFORM,
        };
        if let Some(element) = document.get_mut(node) {
            element.set_style("transform", transform);
        }
    }
}
