//! Portfolio page runtime.
//!
//! # Responsibility
//! - Bind behaviors to the markup contract once, at mount.
//! - Route host events to behaviors and project the resulting state.
//! - Report outward effects (alerts, scroll requests) to the host.
//!
//! # Invariants
//! - Mount fails fast when a required element is missing.
//! - Every dispatched event ends with one `render::project` pass.
//! - Scroll handling is unthrottled: each scroll event recomputes everything.
//! - Capability-dependent behaviors are decided at mount and never re-checked.

use crate::behavior::contact_form::{validate_contact, ContactSubmission, CONFIRMATION_MESSAGE};
use crate::behavior::lazy_image::{LazyImageLoader, LazyImageStrategy};
use crate::behavior::nav::{self, MenuCommand};
use crate::behavior::reveal::{CardRevealer, SectionRevealer};
use crate::behavior::smooth_scroll::{resolve_anchor, ScrollRequest};
use crate::behavior::{fade_in, hover, scroll_spy};
use crate::config::{ConfigError, HostCapabilities, PageConfig};
use crate::dom::{Document, NodeId, Selector, SelectorError};
use crate::scheduler::Scheduler;
use crate::state::render::{self, RenderTargets};
use crate::state::PageState;
use crate::viewport::{RootMargin, Viewport, WatcherOptions};
use log::{debug, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SECTION_TARGETS: &str = ".about, .skills, .education, .projects, .experience, .contact";
const CARD_TARGETS: &str = ".skill-category, .education-card, .project-card, .timeline-item";
const NAV_LINKS: &str = ".nav-links a";
const FRAGMENT_ANCHORS: &str = r##"a[href^="#"]"##;
const SCROLL_SECTIONS: &str = "section";
const FADE_TARGETS: &str = ".fade-in";
const SKILL_TAGS: &str = ".skill-tag";
const DEFERRED_IMAGES: &str = "img[data-src]";

const MENU_TOGGLE_ID: &str = "hamburger";
const MENU_ID: &str = "navLinks";
const BACK_TO_TOP_ID: &str = "backToTop";
const CONTACT_FORM_ID: &str = "contactForm";
const NAME_FIELD_ID: &str = "name";
const EMAIL_FIELD_ID: &str = "email";
const MESSAGE_FIELD_ID: &str = "message";

const KEY_ESCAPE: &str = "Escape";
const KEY_HOME: &str = "Home";

/// Page mount errors.
#[derive(Debug)]
pub enum MountError {
    /// Markup lacks an element the page contract requires.
    MissingElement(&'static str),
    Selector(SelectorError),
    Config(ConfigError),
}

impl Display for MountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElement(id) => write!(f, "required element `#{id}` is missing"),
            Self::Selector(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid page config: {err}"),
        }
    }
}

impl Error for MountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingElement(_) => None,
            Self::Selector(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<SelectorError> for MountError {
    fn from(value: SelectorError) -> Self {
        Self::Selector(value)
    }
}

impl From<ConfigError> for MountError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Host events delivered to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Full page load (all resources).
    Load,
    Scroll { scroll_y: f64 },
    Resize { width: f64, height: f64 },
    Click { target: NodeId },
    KeyDown { key: String },
    MouseEnter { target: NodeId },
    MouseLeave { target: NodeId },
    Submit { target: NodeId },
    /// Visitor typed into a form field.
    Input { target: NodeId, value: String },
    /// Host clock moved forward.
    AdvanceTime { ms: u64 },
}

/// Outward effects for the host to carry out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Effect {
    /// Default browser action for the event must be suppressed.
    PreventDefault,
    /// Blocking notification.
    Alert { message: String },
    ScrollTo(ScrollRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageTask {
    RevealCard(NodeId),
    FadeIn(NodeId),
}

/// Elements bound at mount.
#[derive(Debug, Clone)]
struct Bindings {
    render: RenderTargets,
    contact_form: NodeId,
    name_field: NodeId,
    email_field: NodeId,
    message_field: NodeId,
    sections: Vec<NodeId>,
    fade_targets: Vec<NodeId>,
    skill_tags: Vec<NodeId>,
    anchors: Selector,
    nav_links: Selector,
}

fn required(document: &Document, id: &'static str) -> Result<NodeId, MountError> {
    document
        .node_by_id(id)
        .ok_or(MountError::MissingElement(id))
}

impl Bindings {
    fn resolve(document: &Document) -> Result<Self, MountError> {
        let nav_links = Selector::parse(NAV_LINKS)?;
        let render = RenderTargets {
            menu_toggle: required(document, MENU_TOGGLE_ID)?,
            menu: required(document, MENU_ID)?,
            back_to_top: required(document, BACK_TO_TOP_ID)?,
            nav_links: document.query_selector_all(&nav_links),
        };

        Ok(Self {
            render,
            contact_form: required(document, CONTACT_FORM_ID)?,
            name_field: required(document, NAME_FIELD_ID)?,
            email_field: required(document, EMAIL_FIELD_ID)?,
            message_field: required(document, MESSAGE_FIELD_ID)?,
            sections: document.select(SCROLL_SECTIONS)?,
            fade_targets: document.select(FADE_TARGETS)?,
            skill_tags: document.select(SKILL_TAGS)?,
            anchors: Selector::parse(FRAGMENT_ANCHORS)?,
            nav_links,
        })
    }
}

/// One loaded portfolio page.
#[derive(Debug)]
pub struct PortfolioPage {
    document: Document,
    viewport: Viewport,
    config: PageConfig,
    state: PageState,
    bindings: Bindings,
    sections: Option<SectionRevealer>,
    cards: Option<CardRevealer>,
    images: LazyImageLoader,
    scheduler: Scheduler<PageTask>,
}

impl PortfolioPage {
    /// Mounts behaviors onto `document` (the DOM-ready step).
    ///
    /// # Errors
    /// - `MountError::Config` when `config` fails validation.
    /// - `MountError::MissingElement` when the markup contract is not met.
    pub fn mount(
        document: Document,
        viewport: Viewport,
        capabilities: HostCapabilities,
        config: PageConfig,
    ) -> Result<Self, MountError> {
        config.validate()?;
        let bindings = Bindings::resolve(&document)?;
        let mut state = PageState::new();

        let reveal_options = WatcherOptions {
            threshold: config.reveal_threshold,
            root_margin: RootMargin::bottom(config.reveal_bottom_margin_px),
        };
        let (sections, cards) = if capabilities.intersection_observer {
            let mut sections = SectionRevealer::new(reveal_options);
            sections.observe(&mut state, &document.select(SECTION_TARGETS)?);
            let mut cards = CardRevealer::new(reveal_options, config.card_stagger_ms);
            cards.observe(&mut state, &document.select(CARD_TARGETS)?);
            (Some(sections), Some(cards))
        } else {
            warn!("event=reveal_disabled module=page status=degraded reason=no_intersection_observer");
            (None, None)
        };

        let strategy = LazyImageStrategy::select(&capabilities, config.lazy_image_fallback);
        let images = LazyImageLoader::mount(strategy, &document.select(DEFERRED_IMAGES)?, &mut state);

        let mut page = Self {
            document,
            viewport,
            config,
            state,
            bindings,
            sections,
            cards,
            images,
            scheduler: Scheduler::new(),
        };
        render::adopt_markup(&mut page.state, &page.document, &page.bindings.render);
        page.refresh_watchers();
        page.render();

        info!(
            "event=page_mounted module=page status=ok elements={} sections={} cards={} lazy_images={}",
            page.document.len(),
            page.sections.as_ref().map_or(0, SectionRevealer::observed_count),
            page.cards.as_ref().map_or(0, CardRevealer::observed_count),
            page.images.strategy().as_str()
        );
        Ok(page)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn lazy_image_strategy(&self) -> LazyImageStrategy {
        self.images.strategy()
    }

    /// Virtual time elapsed since mount.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Node for DOM id `dom_id`, for hosts addressing event targets.
    pub fn node(&self, dom_id: &str) -> Option<NodeId> {
        self.document.node_by_id(dom_id)
    }

    /// Nodes matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.document.select(selector)
    }

    /// Handles one host event and returns the effects it produced.
    pub fn dispatch(&mut self, event: PageEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            PageEvent::Load => self.on_load(),
            PageEvent::Scroll { scroll_y } => self.on_scroll(scroll_y),
            PageEvent::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                self.refresh_watchers();
            }
            PageEvent::Click { target } => self.on_click(target, &mut effects),
            PageEvent::KeyDown { key } => self.on_key(&key, &mut effects),
            PageEvent::MouseEnter { target } => {
                if self.bindings.skill_tags.contains(&target) {
                    hover::on_enter(&mut self.state, target);
                }
            }
            PageEvent::MouseLeave { target } => {
                if self.bindings.skill_tags.contains(&target) {
                    hover::on_leave(&mut self.state, target);
                }
            }
            PageEvent::Submit { target } => {
                if target == self.bindings.contact_form {
                    self.on_submit(&mut effects);
                }
            }
            PageEvent::Input { target, value } => {
                if let Some(element) = self.document.get_mut(target) {
                    if element.is_form_field() {
                        element.set_value(value);
                    }
                }
            }
            PageEvent::AdvanceTime { ms } => self.on_advance(ms),
        }
        self.render();
        effects
    }

    fn render(&mut self) {
        render::project(&self.state, &mut self.document, &self.bindings.render);
    }

    fn refresh_watchers(&mut self) {
        if let Some(sections) = self.sections.as_mut() {
            sections.update(&self.document, &self.viewport, &mut self.state);
        }
        if let Some(cards) = self.cards.as_mut() {
            for reveal in cards.update(&self.document, &self.viewport, &mut self.state) {
                self.scheduler
                    .schedule(reveal.delay_ms, PageTask::RevealCard(reveal.target));
            }
        }
        self.images
            .update(&self.document, &self.viewport, &mut self.state);
    }

    fn on_load(&mut self) {
        let schedule = fade_in::fade_schedule(&self.bindings.fade_targets, self.config.fade_interval_ms);
        for (node, delay_ms) in schedule {
            self.state.schedule_fade(node);
            self.scheduler.schedule(delay_ms, PageTask::FadeIn(node));
        }
        debug!(
            "event=fade_sequence_scheduled module=page status=ok count={}",
            self.bindings.fade_targets.len()
        );
    }

    fn on_scroll(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y.max(0.0);
        scroll_spy::react(
            &mut self.state,
            &self.document,
            &self.bindings.sections,
            self.viewport.scroll_y,
            self.config.section_lookahead_px,
            self.config.back_to_top_threshold_px,
        );
        self.refresh_watchers();
    }

    fn on_click(&mut self, target: NodeId, effects: &mut Vec<Effect>) {
        let toggle = self.bindings.render.menu_toggle;
        if target == toggle || self.document.is_descendant_of(target, toggle) {
            self.state.menu = nav::apply(self.state.menu, MenuCommand::Toggle);
        }

        if self.document.closest(target, &self.bindings.nav_links).is_some() {
            self.state.menu = nav::apply(self.state.menu, MenuCommand::LinkFollowed);
        }

        if let Some(anchor) = self.document.closest(target, &self.bindings.anchors) {
            push_unique(effects, Effect::PreventDefault);
            let href = self
                .document
                .get(anchor)
                .and_then(|element| element.attribute("href"))
                .unwrap_or_default();
            if let Some(request) = resolve_anchor(&self.document, href) {
                effects.push(Effect::ScrollTo(request));
            }
        }

        let back_to_top = self.bindings.render.back_to_top;
        if target == back_to_top || self.document.is_descendant_of(target, back_to_top) {
            effects.push(Effect::ScrollTo(ScrollRequest::to_page_top()));
        }
    }

    fn on_key(&mut self, key: &str, effects: &mut Vec<Effect>) {
        match key {
            KEY_ESCAPE => {
                self.state.menu = nav::apply(self.state.menu, MenuCommand::Escape);
            }
            KEY_HOME => {
                push_unique(effects, Effect::PreventDefault);
                effects.push(Effect::ScrollTo(ScrollRequest::to_page_top()));
            }
            _ => {}
        }
    }

    fn field_value(&self, node: NodeId) -> String {
        self.document
            .get(node)
            .and_then(|element| element.value())
            .unwrap_or_default()
            .to_string()
    }

    fn on_submit(&mut self, effects: &mut Vec<Effect>) {
        push_unique(effects, Effect::PreventDefault);
        let submission = ContactSubmission::new(
            self.field_value(self.bindings.name_field),
            self.field_value(self.bindings.email_field),
            self.field_value(self.bindings.message_field),
        );

        match validate_contact(&submission) {
            Ok(()) => {
                effects.push(Effect::Alert {
                    message: CONFIRMATION_MESSAGE.to_string(),
                });
                self.reset_contact_form();
                info!("event=contact_submitted module=page status=ok");
            }
            Err(rejection) => {
                effects.push(Effect::Alert {
                    message: rejection.user_message().to_string(),
                });
                info!(
                    "event=contact_submitted module=page status=rejected reason={rejection:?} email_len={}",
                    submission.email.chars().count()
                );
            }
        }
    }

    fn reset_contact_form(&mut self) {
        for node in self.document.descendants(self.bindings.contact_form) {
            if let Some(element) = self.document.get_mut(node) {
                if element.is_form_field() {
                    element.reset_value();
                }
            }
        }
    }

    fn on_advance(&mut self, ms: u64) {
        for task in self.scheduler.advance(ms) {
            match task {
                PageTask::RevealCard(node) => {
                    self.state.reveal(node);
                }
                PageTask::FadeIn(node) => self.state.complete_fade(node),
            }
        }
    }
}

fn push_unique(effects: &mut Vec<Effect>, effect: Effect) {
    if !effects.contains(&effect) {
        effects.push(effect);
    }
}
