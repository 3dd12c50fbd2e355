//! Behavior engine for a static portfolio page.
//! This crate is the single source of truth for page interaction rules.

pub mod behavior;
pub mod config;
pub mod dom;
pub mod logging;
pub mod page;
pub mod scheduler;
pub mod state;
pub mod viewport;

pub use behavior::contact_form::{
    is_valid_email, validate_contact, ContactRejection, ContactSubmission,
};
pub use behavior::lazy_image::{LazyImageFallback, LazyImageStrategy};
pub use behavior::smooth_scroll::{ScrollBehavior, ScrollRequest};
pub use config::{ConfigError, HostCapabilities, PageConfig};
pub use dom::{Document, Element, ElementSpec, NodeId, Selector, SelectorError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use page::{Effect, MountError, PageEvent, PortfolioPage};
pub use state::{
    FadeState, HoverState, ImageState, MenuState, PageState, RevealState, Visibility,
};
pub use viewport::{RootMargin, Viewport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
